// Blablador Command Center
// Holds the most recent voice command until the UI delivers it to the page.
// Single writer (voice handler) and single reader (UI), both on the UI thread.

use tracing::{debug, info};

use crate::types::command::VoiceCommand;

/// Trait defining the pending-command holder interface.
pub trait CommandCenterTrait {
    /// Stores an already-built command, replacing any unconsumed one.
    fn store(&mut self, command: VoiceCommand);
    fn pending(&self) -> Option<&VoiceCommand>;
    fn consume(&mut self) -> Option<VoiceCommand>;

    /// Wraps `text` in a fresh command and stores it.
    fn handle(&mut self, text: &str) -> VoiceCommand {
        let command = VoiceCommand::new(text);
        self.store(command.clone());
        command
    }
}

#[derive(Debug, Default)]
pub struct CommandCenter {
    pending: Option<VoiceCommand>,
}

impl CommandCenter {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl CommandCenterTrait for CommandCenter {
    fn store(&mut self, command: VoiceCommand) {
        info!(id = %command.id, "voice command received");
        if let Some(previous) = self.pending.replace(command) {
            debug!(id = %previous.id, "unconsumed command replaced");
        }
    }

    fn pending(&self) -> Option<&VoiceCommand> {
        self.pending.as_ref()
    }

    /// Takes the pending command. The holder is always empty afterwards.
    fn consume(&mut self) -> Option<VoiceCommand> {
        self.pending.take()
    }
}
