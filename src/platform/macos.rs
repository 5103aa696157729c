// Blablador platform glue for macOS
// Config: ~/Library/Application Support/Blablador
// Data:   ~/Library/Application Support/Blablador

use std::env;
use std::path::{Path, PathBuf};

use super::CredentialTarget;
use crate::types::errors::PlatformError;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/Blablador`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Blablador")
}

/// Same directory as the config on macOS.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

/// The Passwords app (macOS 15+), then its System Settings pane, then
/// System Settings itself.
pub fn credential_manager_targets() -> Vec<CredentialTarget> {
    vec![
        CredentialTarget::App(PathBuf::from("/System/Applications/Passwords.app")),
        CredentialTarget::Url("x-apple.systempreferences:com.apple.Passwords".to_string()),
        CredentialTarget::Url("x-apple.systempreferences:".to_string()),
    ]
}

/// App bundles are opened through LaunchServices.
pub fn launch_app(path: &Path) -> Result<(), PlatformError> {
    open::that(path).map_err(|e| PlatformError::LaunchFailed(format!("{}: {}", path.display(), e)))
}
