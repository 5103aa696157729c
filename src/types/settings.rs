use serde::{Deserialize, Serialize};

/// Default page shown by the shell.
pub const DEFAULT_START_URL: &str = "https://staging.helmholtz-blablador.fz-juelich.de";

/// Default loopback address of the voice intent socket.
pub const DEFAULT_INTENT_ADDR: &str = "127.0.0.1:47615";

/// Top-level shell settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub webview: WebViewSettings,
    #[serde(default)]
    pub voice: VoiceSettings,
    #[serde(default)]
    pub share: ShareSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General shell settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    pub start_url: String,
    pub app_name: String,
    pub presentation: Presentation,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            app_name: "Blablador".to_string(),
            presentation: Presentation::Desktop,
        }
    }
}

/// How much chrome the shell draws around the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Presentation {
    /// Toolbar with navigation, share and desktop-only actions.
    Desktop,
    /// No toolbar; the page fills the window.
    Compact,
}

/// Main window geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Blablador".to_string(),
            width: 1100.0,
            height: 800.0,
            min_width: 800.0,
            min_height: 600.0,
        }
    }
}

/// Embedded browser configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebViewSettings {
    pub javascript_can_open_windows: bool,
    pub back_forward_gestures: bool,
    pub max_history_entries: usize,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            javascript_can_open_windows: true,
            back_forward_gestures: true,
            max_history_entries: 100,
        }
    }
}

/// Voice intent surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceSettings {
    pub enabled: bool,
    pub listen_addr: String,
    pub max_requests_per_second: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_addr: DEFAULT_INTENT_ADDR.to_string(),
            max_requests_per_second: 200,
        }
    }
}

/// Where "Share" sends the current URL on desktop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShareTarget {
    Clipboard,
    Email,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShareSettings {
    pub target: ShareTarget,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self { target: ShareTarget::Clipboard }
    }
}

/// Credential-manager shortcut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CredentialSettings {
    /// Extra targets tried before the platform defaults.
    pub extra_targets: Vec<String>,
    /// Delay before the shell refocuses itself and reloads the page.
    pub return_delay_ms: u64,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            extra_targets: Vec::new(),
            return_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `blablador=info`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "blablador=info".to_string() }
    }
}
