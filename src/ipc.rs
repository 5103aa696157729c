//! Messages between the injected page scripts and the shell.
//!
//! JS → Rust: `window.ipc.postMessage(JSON.stringify({cmd: "...", ...}))`.
//! Rust → JS: small script snippets evaluated in the page.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::types::command::VoiceCommand;
use crate::types::navigation::{NavigationEvent, NavigationState, PageLoadPhase};
use crate::types::settings::Presentation;

/// Installs `window.__bb_ipc`, SPA URL tracking and the command hand-off.
const BRIDGE_JS: &str = include_str!("../resources/ui/bridge.js");
/// Desktop toolbar overlay.
const TOOLBAR_JS: &str = include_str!("../resources/ui/toolbar.js");

/// An action requested by the page scripts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ShellAction {
    /// Scripts finished installing on a freshly loaded document.
    UiReady,
    Back,
    Forward,
    Reload,
    Share,
    OpenInBrowser,
    OpenCredentials,
    /// Same-document URL change. `replace` is set for `replaceState`.
    UrlChanged {
        url: String,
        #[serde(default)]
        replace: bool,
    },
    /// The page took (or failed to take) a voice command.
    CommandDelivered { id: Uuid, delivered: bool },
}

impl ShellAction {
    /// The history event a same-document URL change maps to.
    pub fn navigation_event(&self) -> Option<NavigationEvent> {
        match self {
            ShellAction::UrlChanged { url, replace } => {
                let phase = if *replace {
                    PageLoadPhase::Replaced
                } else {
                    PageLoadPhase::Committed
                };
                NavigationEvent::parse(phase, url)
            }
            _ => None,
        }
    }
}

/// Parses one IPC body. Unknown or malformed messages are ignored.
pub fn parse_message(body: &str) -> Option<ShellAction> {
    match serde_json::from_str(body) {
        Ok(action) => Some(action),
        Err(e) => {
            let preview: String = body.chars().take(200).collect();
            debug!(error = %e, body = %preview, "ignoring IPC message");
            None
        }
    }
}

/// Initialization script injected into every document.
pub fn initialization_script(presentation: Presentation) -> String {
    match presentation {
        Presentation::Desktop => format!("{}\n{}", BRIDGE_JS, TOOLBAR_JS),
        Presentation::Compact => BRIDGE_JS.to_string(),
    }
}

pub fn nav_update_script(state: &NavigationState) -> String {
    let payload = json!({
        "canGoBack": state.can_go_back,
        "canGoForward": state.can_go_forward,
        "url": state.current_url.as_ref().map(|u| u.as_str()),
    });
    format!("if(window.__bb_updateNav)__bb_updateNav({})", payload)
}

pub fn deliver_command_script(command: &VoiceCommand) -> String {
    let payload = json!({"id": command.id, "text": command.text});
    format!("if(window.__bb_deliverCommand)__bb_deliverCommand({})", payload)
}

pub fn toast_script(message: &str) -> String {
    format!("if(window.__bb_showToast)__bb_showToast({})", json!(message))
}
