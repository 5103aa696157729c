//! Toolbar actions that leave the browser view: share, open in the default
//! browser, and the credential-manager shortcut.
//!
//! All of them are best-effort. Failures are logged and the next fallback is
//! tried; when nothing works the action is a no-op.

use tracing::{info, warn};
use url::Url;

use crate::platform::{CredentialTarget, SystemBridge};
use crate::types::navigation::NavigationState;
use crate::types::settings::ShareTarget;

/// What an action ended up doing, so the UI can show feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Text placed on the clipboard.
    Copied(String),
    /// URL handed to the default handler.
    Opened(String),
    /// Host copied and a credential manager opened.
    CredentialManagerOpened { host: Option<String>, target: CredentialTarget },
    /// Host copied but no credential manager target worked.
    CredentialManagerUnavailable { host: Option<String> },
    /// Nothing to do.
    Skipped,
}

pub struct DesktopActions<B: SystemBridge> {
    bridge: B,
    share_target: ShareTarget,
    credential_targets: Vec<CredentialTarget>,
}

impl<B: SystemBridge> DesktopActions<B> {
    pub fn new(bridge: B, share_target: ShareTarget, credential_targets: Vec<CredentialTarget>) -> Self {
        Self {
            bridge,
            share_target,
            credential_targets,
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Shares the current URL. No URL means nothing to share.
    pub fn share_current_url(&self, state: &NavigationState) -> ActionOutcome {
        let Some(url) = state.current_url.as_ref() else {
            return ActionOutcome::Skipped;
        };

        match self.share_target {
            ShareTarget::Clipboard => match self.bridge.set_clipboard(url.as_str()) {
                Ok(()) => {
                    info!(url = %url, "shared to clipboard");
                    ActionOutcome::Copied(url.to_string())
                }
                Err(e) => {
                    warn!(error = %e, "share via clipboard failed");
                    ActionOutcome::Skipped
                }
            },
            ShareTarget::Email => {
                let mailto = mailto_for(url);
                match self.bridge.open_url(&mailto) {
                    Ok(()) => ActionOutcome::Opened(mailto),
                    Err(e) => {
                        warn!(error = %e, "share via mail failed");
                        ActionOutcome::Skipped
                    }
                }
            }
        }
    }

    /// Opens the current URL (or the start URL before anything loaded) in
    /// the system's default browser.
    pub fn open_in_browser(&self, state: &NavigationState, start_url: &Url) -> ActionOutcome {
        let url = state.current_url.as_ref().unwrap_or(start_url);
        match self.bridge.open_url(url.as_str()) {
            Ok(()) => ActionOutcome::Opened(url.to_string()),
            Err(e) => {
                warn!(error = %e, "open in browser failed");
                ActionOutcome::Skipped
            }
        }
    }

    /// Copies the site's host to the clipboard so it can be pasted into the
    /// search field, then opens the first credential manager that works.
    pub fn open_credential_manager(&self, state: &NavigationState, start_url: &Url) -> ActionOutcome {
        let host = state
            .current_url
            .as_ref()
            .unwrap_or(start_url)
            .host_str()
            .map(str::to_string);

        if let Some(h) = host.as_deref() {
            if let Err(e) = self.bridge.set_clipboard(h) {
                warn!(error = %e, "copying host failed");
            }
        }

        for target in &self.credential_targets {
            let result = match target {
                CredentialTarget::App(path) => {
                    if !self.bridge.path_exists(path) {
                        continue;
                    }
                    self.bridge.launch_app(path)
                }
                CredentialTarget::Url(url) => self.bridge.open_url(url),
            };
            match result {
                Ok(()) => {
                    info!(?target, "credential manager opened");
                    return ActionOutcome::CredentialManagerOpened {
                        host,
                        target: target.clone(),
                    };
                }
                Err(e) => warn!(?target, error = %e, "credential manager target failed"),
            }
        }

        ActionOutcome::CredentialManagerUnavailable { host }
    }
}

fn mailto_for(url: &Url) -> String {
    let body: String = url::form_urlencoded::byte_serialize(url.as_str().as_bytes()).collect();
    format!("mailto:?body={}", body)
}
