//! Top-level error wrapper types.

use crate::{ChatError, ConfigError, RelayError, ValidationError};

/// Every error an odcompile operation can surface.
///
/// # Examples
///
/// ```
/// use odcompile_error::{ConfigError, ConfigErrorKind, OdCompileError};
///
/// let err: OdCompileError = ConfigError::new(ConfigErrorKind::MissingListenerUrl).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum OdCompileErrorKind {
    /// User input error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Listener relay error
    #[from(RelayError)]
    Relay(RelayError),
    /// Chat platform error
    #[from(ChatError)]
    Chat(ChatError),
    /// Local file I/O error
    #[from(std::io::Error)]
    Io(std::io::Error),
}

/// odcompile error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("odcompile Error: {}", _0)]
pub struct OdCompileError(Box<OdCompileErrorKind>);

impl OdCompileError {
    /// Create a new error from a kind.
    pub fn new(kind: OdCompileErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &OdCompileErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to OdCompileErrorKind
impl<T> From<T> for OdCompileError
where
    T: Into<OdCompileErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for odcompile operations.
pub type OdCompileResult<T> = std::result::Result<T, OdCompileError>;
