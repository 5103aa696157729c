//! App Core for Blablador.
//!
//! Holds settings, the pending-command holder and the resolved start URL,
//! and builds the services the UI needs.

use tracing::{info, warn};
use url::Url;

use crate::platform::{self, CredentialTarget, NativeBridge, SystemBridge};
use crate::services::command_center::{CommandCenter, CommandCenterTrait};
use crate::services::desktop_actions::DesktopActions;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::voice_intent::VoiceIntent;
use crate::types::errors::{SettingsError, ShellError};
use crate::types::settings::ShellSettings;

pub struct App {
    pub settings_engine: SettingsEngine,
    pub command_center: CommandCenter,
    start_url: Url,
    /// Why the settings file was ignored, reported once logging is up.
    settings_error: Option<SettingsError>,
}

impl App {
    /// Loads settings (falling back to defaults when the file is unreadable)
    /// and resolves the start URL, letting `url_override` win.
    ///
    /// A load failure is kept and logged by `startup`, since this runs
    /// before the subscriber is installed.
    pub fn new(config_path: Option<String>, url_override: Option<&str>) -> Result<Self, ShellError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings_error = settings_engine.load().err();

        let start_url = resolve_start_url(
            &settings_engine.get_settings().general.start_url,
            url_override,
        )?;

        Ok(Self {
            settings_engine,
            command_center: CommandCenter::new(),
            start_url,
            settings_error,
        })
    }

    pub fn settings(&self) -> &ShellSettings {
        self.settings_engine.get_settings()
    }

    pub fn settings_load_error(&self) -> Option<&SettingsError> {
        self.settings_error.as_ref()
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    pub fn voice_intent(&self) -> VoiceIntent {
        VoiceIntent::new(&self.settings().general.app_name)
    }

    /// Configured credential targets first, then the platform defaults.
    pub fn credential_targets(&self) -> Vec<CredentialTarget> {
        self.settings()
            .credentials
            .extra_targets
            .iter()
            .map(|raw| CredentialTarget::parse(raw))
            .chain(platform::credential_manager_targets())
            .collect()
    }

    pub fn desktop_actions_with<B: SystemBridge>(&self, bridge: B) -> DesktopActions<B> {
        DesktopActions::new(bridge, self.settings().share.target, self.credential_targets())
    }

    pub fn desktop_actions(&self) -> DesktopActions<NativeBridge> {
        self.desktop_actions_with(NativeBridge)
    }

    pub fn startup(&self) {
        if let Some(e) = &self.settings_error {
            warn!(
                config = self.settings_engine.get_config_path(),
                error = %e,
                "settings load failed, using defaults"
            );
        }
        info!(
            start_url = %self.start_url,
            config = self.settings_engine.get_config_path(),
            presentation = ?self.settings().general.presentation,
            "shell starting"
        );
    }

    pub fn shutdown(&mut self) {
        if let Some(cmd) = self.command_center.pending() {
            warn!(id = %cmd.id, "exiting with an undelivered voice command");
        }
        info!("shell stopped");
    }
}

/// Only absolute http(s) URLs can be start pages.
pub fn resolve_start_url(configured: &str, url_override: Option<&str>) -> Result<Url, ShellError> {
    let raw = url_override.unwrap_or(configured).trim();
    let url = Url::parse(raw).map_err(|e| ShellError::InvalidStartUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ShellError::InvalidStartUrl(format!(
            "{}: unsupported scheme '{}'",
            raw, other
        ))),
    }
}
