//! Configuration error types.

/// Specific configuration error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// No listener URL was supplied.
    #[display("Listener URL is missing")]
    MissingListenerUrl,
    /// The supplied listener URL is not an absolute http(s) URL.
    #[display("Invalid listener URL '{}': {}", url, reason)]
    InvalidListenerUrl {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },
    /// Reading or writing the persisted store failed.
    #[display("Config store I/O failed: {}", _0)]
    StoreIo(String),
    /// The persisted store could not be (de)serialized.
    #[display("Config store serialization failed: {}", _0)]
    StoreFormat(String),
    /// Application settings could not be loaded.
    #[display("Failed to load settings: {}", _0)]
    Settings(String),
    /// A required environment variable is not set.
    #[display("Environment variable {} is not set", _0)]
    MissingEnv(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use odcompile_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingListenerUrl);
/// assert!(format!("{}", err).contains("missing"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The specific error condition
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given kind at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
