// Blablador platform glue for Windows
// Config: %APPDATA%/Blablador
// Data:   %LOCALAPPDATA%/Blablador

use std::env;
use std::path::{Path, PathBuf};

use super::CredentialTarget;
use crate::types::errors::PlatformError;

/// `%APPDATA%/Blablador`
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("Blablador")
}

/// `%LOCALAPPDATA%/Blablador`; WebView2 keeps its profile here.
pub fn get_data_dir() -> PathBuf {
    let local = env::var("LOCALAPPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(local).join("Blablador")
}

/// Sign-in options in the Settings app.
pub fn credential_manager_targets() -> Vec<CredentialTarget> {
    vec![CredentialTarget::Url("ms-settings:signinoptions".to_string())]
}

pub fn launch_app(path: &Path) -> Result<(), PlatformError> {
    super::spawn_detached(path)
}
