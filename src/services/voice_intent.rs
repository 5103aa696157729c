//! The "Tell Blablador" voice intent.
//!
//! One phrase-triggered action with a single free-text parameter. The
//! assistant either hands us the parameter directly (`perform`) or a raw
//! utterance that still starts with one of the trigger phrases
//! (`match_utterance`). Either way the command ends up in a `CommandSink`,
//! which in the running shell forwards it onto the UI event loop.

use std::sync::mpsc::Sender;

use tracing::{debug, info};

use crate::types::command::VoiceCommand;
use crate::types::errors::IntentError;
use crate::types::intent::IntentDefinition;

/// Destination for accepted commands.
pub trait CommandSink: Send + Sync {
    fn deliver(&self, command: VoiceCommand) -> Result<(), IntentError>;
}

impl CommandSink for Sender<VoiceCommand> {
    fn deliver(&self, command: VoiceCommand) -> Result<(), IntentError> {
        self.send(command)
            .map_err(|e| IntentError::DeliveryFailed(e.to_string()))
    }
}

/// Result of a successful intent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentOutcome {
    pub command: VoiceCommand,
    /// Spoken confirmation returned to the assistant.
    pub dialog: String,
}

pub struct VoiceIntent {
    app_name: String,
    definition: IntentDefinition,
}

impl VoiceIntent {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            definition: Self::build_definition(app_name),
        }
    }

    fn build_definition(app_name: &str) -> IntentDefinition {
        IntentDefinition {
            title: format!("Tell {app_name}"),
            description: format!("Send a command to {app_name}."),
            phrases: vec!["Tell {app}".to_string(), "Ask {app}".to_string()],
            parameter_title: "Command".to_string(),
            parameter_description: format!("What you want {app_name} to do"),
            parameter_prompt: format!("What should {app_name} do?"),
            short_title: format!("Tell {app_name}"),
            system_image: "mic".to_string(),
            open_app_when_run: true,
        }
    }

    pub fn definition(&self) -> &IntentDefinition {
        &self.definition
    }

    /// Trigger phrases with the application name filled in.
    pub fn phrases(&self) -> Vec<String> {
        self.definition
            .phrases
            .iter()
            .map(|p| p.replace("{app}", &self.app_name))
            .collect()
    }

    /// Extracts the command parameter from a spoken utterance such as
    /// "Tell Blablador to summarize this page".
    pub fn match_utterance(&self, utterance: &str) -> Result<String, IntentError> {
        let text = utterance.trim();
        for phrase in self.phrases() {
            let Some(rest) = strip_prefix_ignore_case(text, &phrase) else {
                continue;
            };
            if !rest.is_empty() && !rest.starts_with(is_phrase_boundary) {
                continue;
            }
            debug!(phrase = %phrase, "utterance matched");
            let command = clean_parameter(rest);
            if command.is_empty() {
                return Err(IntentError::MissingParameter(
                    self.definition.parameter_prompt.clone(),
                ));
            }
            return Ok(command);
        }
        Err(IntentError::NoMatch(text.to_string()))
    }

    /// Runs the intent with an already-extracted parameter.
    pub fn perform(&self, command: &str, sink: &dyn CommandSink) -> Result<IntentOutcome, IntentError> {
        let text = command.trim();
        if text.is_empty() {
            return Err(IntentError::MissingParameter(
                self.definition.parameter_prompt.clone(),
            ));
        }
        let command = VoiceCommand::new(text);
        sink.deliver(command.clone())?;
        info!(id = %command.id, "voice command forwarded");
        Ok(IntentOutcome {
            dialog: self.dialog_for(text),
            command,
        })
    }

    pub fn dialog_for(&self, command: &str) -> String {
        format!("Sending \"{}\" to {}.", command, self.app_name)
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, c) = chars.next()?;
        if !c.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| &text[i..]).unwrap_or(""))
}

fn is_phrase_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ':' | '.' | '!' | '?')
}

/// Drops separators, a leading "to", trailing sentence punctuation and
/// surrounding quotes.
fn clean_parameter(rest: &str) -> String {
    let mut s = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',' || c == ':');
    if let Some(after) = strip_prefix_ignore_case(s, "to") {
        if after.is_empty() || after.starts_with(char::is_whitespace) {
            s = after;
        }
    }
    s.trim()
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .trim_matches(['"', '\u{201c}', '\u{201d}'])
        .trim()
        .to_string()
}
