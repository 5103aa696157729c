// Blablador platform abstraction
// Platform-specific paths, credential-manager locations and the bridge to
// OS services (default URL handler, application launch, clipboard).
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::errors::PlatformError;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as native;
#[cfg(target_os = "macos")]
use macos as native;
#[cfg(target_os = "windows")]
use windows as native;

/// Returns the platform-specific configuration directory for Blablador.
///
/// - **Linux**: `~/.config/blablador` (or `$XDG_CONFIG_HOME/blablador`)
/// - **macOS**: `~/Library/Application Support/Blablador`
/// - **Windows**: `%APPDATA%/Blablador`
pub fn get_config_dir() -> PathBuf {
    native::get_config_dir()
}

/// Returns the platform-specific data directory (webview profile lives here).
pub fn get_data_dir() -> PathBuf {
    native::get_data_dir()
}

/// Where the credential manager can be found, in the order to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialTarget {
    /// An installed application bundle or executable.
    App(PathBuf),
    /// A URL handed to the system's default handler.
    Url(String),
}

impl CredentialTarget {
    /// Interprets a user-configured target: anything with a URL scheme is a
    /// URL, everything else a path.
    pub fn parse(raw: &str) -> Self {
        let is_url = raw
            .split_once(':')
            .map(|(scheme, _)| {
                scheme.len() > 1
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            })
            .unwrap_or(false);
        if is_url {
            CredentialTarget::Url(raw.to_string())
        } else {
            CredentialTarget::App(PathBuf::from(raw))
        }
    }
}

/// Starts `path` and reaps it on a background thread once it exits.
#[cfg(any(target_os = "linux", target_os = "windows"))]
pub(crate) fn spawn_detached(path: &Path) -> Result<(), PlatformError> {
    let mut child = std::process::Command::new(path)
        .spawn()
        .map_err(|e| PlatformError::LaunchFailed(format!("{}: {}", path.display(), e)))?;
    let name = path.display().to_string();
    std::thread::Builder::new()
        .name("blablador-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => debug!(app = %name, %status, "launched application exited"),
            Err(e) => debug!(app = %name, error = %e, "waiting on launched application failed"),
        })
        .map_err(|e| PlatformError::LaunchFailed(e.to_string()))?;
    Ok(())
}

/// Platform default credential-manager targets.
pub fn credential_manager_targets() -> Vec<CredentialTarget> {
    native::credential_manager_targets()
}

/// OS services used by the desktop actions.
pub trait SystemBridge {
    fn open_url(&self, url: &str) -> Result<(), PlatformError>;
    fn launch_app(&self, path: &Path) -> Result<(), PlatformError>;
    fn set_clipboard(&self, text: &str) -> Result<(), PlatformError>;
    fn path_exists(&self, path: &Path) -> bool;
}

/// The real bridge: `open` for default handlers, `arboard` for the clipboard.
#[derive(Debug, Default)]
pub struct NativeBridge;

impl SystemBridge for NativeBridge {
    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        debug!(url, "opening with default handler");
        open::that(url).map_err(|e| PlatformError::OpenFailed(format!("{}: {}", url, e)))
    }

    fn launch_app(&self, path: &Path) -> Result<(), PlatformError> {
        debug!(path = %path.display(), "launching application");
        native::launch_app(path)
    }

    fn set_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
