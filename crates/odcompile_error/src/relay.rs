//! Listener relay error types.

/// Transport-level failures talking to the compile listener.
///
/// None of these describe a problem with the submitted DM code; a listener
/// that answered with a compile error is a successful relay.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RelayErrorKind {
    /// The listener did not answer within the configured bound (milliseconds).
    #[display("Listener timed out after {} ms", _0)]
    Timeout(u64),

    /// Connection refused, DNS failure or similar.
    #[display("Could not connect to listener: {}", _0)]
    Connection(String),

    /// The listener answered with a non-success status.
    #[display("Listener returned HTTP {}", _0)]
    Status(u16),

    /// The body did not match the expected response shape.
    #[display("Malformed listener response: {}", _0)]
    MalformedResponse(String),

    /// The configured listener URL could not be read.
    #[display("Listener URL unavailable: {}", _0)]
    Configuration(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Relay Error: {} at line {} in {}", kind, line, file)]
pub struct RelayError {
    /// The error kind
    pub kind: RelayErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl RelayError {
    /// Create a new RelayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RelayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
