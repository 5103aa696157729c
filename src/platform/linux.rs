// Blablador platform glue for Linux
// Config: ~/.config/blablador
// Data:   ~/.local/share/blablador

use std::env;
use std::path::{Path, PathBuf};

use super::CredentialTarget;
use crate::types::errors::PlatformError;

/// Uses `$XDG_CONFIG_HOME/blablador` if set, otherwise `~/.config/blablador`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("blablador")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("blablador")
    }
}

/// Uses `$XDG_DATA_HOME/blablador` if set, otherwise `~/.local/share/blablador`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("blablador")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("blablador")
    }
}

/// GNOME Passwords and Keys, then KDE Wallet Manager.
pub fn credential_manager_targets() -> Vec<CredentialTarget> {
    vec![
        CredentialTarget::App(PathBuf::from("/usr/bin/seahorse")),
        CredentialTarget::App(PathBuf::from("/usr/bin/kwalletmanager5")),
    ]
}

pub fn launch_app(path: &Path) -> Result<(), PlatformError> {
    super::spawn_detached(path)
}
