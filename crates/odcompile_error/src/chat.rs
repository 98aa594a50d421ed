//! Chat platform error types.

/// Chat platform error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ChatErrorKind {
    /// Message failed to send.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),

    /// Message failed to delete.
    #[display("Message delete failed: {_0}")]
    MessageDeleteFailed(String),

    /// Connection to the chat gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),
}

/// Chat error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    /// The error kind
    pub kind: ChatErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ChatError {
    /// Create a new ChatError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
