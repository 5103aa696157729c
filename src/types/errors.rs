use thiserror::Error;

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === EngineError ===

/// Errors reported by the embedded browser engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The URL could not be parsed or is not loadable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The engine rejected or failed a navigation request.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),
    /// Evaluating a script inside the page failed.
    #[error("Script evaluation failed: {0}")]
    ScriptFailed(String),
}

// === PlatformError ===

/// Errors related to operating-system integration.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Clipboard access failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    /// Handing a URL to the default handler failed.
    #[error("Failed to open {0}")]
    OpenFailed(String),
    /// Launching an application failed.
    #[error("Failed to launch application: {0}")]
    LaunchFailed(String),
    /// The capability is not available on this platform.
    #[error("Not supported on this platform: {0}")]
    NotSupported(String),
}

// === IntentError ===

/// Errors related to the voice intent surface.
#[derive(Debug, Error)]
pub enum IntentError {
    /// The utterance did not start with any registered phrase.
    #[error("No phrase matches: {0}")]
    NoMatch(String),
    /// The command parameter is missing; carries the prompt to ask the user.
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    /// The request method is not known.
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    /// The request was malformed.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The shell is not running or no longer accepts commands.
    #[error("Command delivery failed: {0}")]
    DeliveryFailed(String),
    /// Socket-level failure.
    #[error("Intent transport error: {0}")]
    Transport(String),
}

// === ShellError ===

/// Top-level error for shell startup.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Intent(#[from] IntentError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The configured start URL is not a valid absolute URL.
    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(String),
}
