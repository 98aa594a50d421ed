//! User input validation errors.

/// Reasons a chat submission is refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// No fenced or inline code block was found.
    #[display("No code block provided")]
    MissingCode,
    /// The code body contains an `#include` directive.
    #[display("Code contains a forbidden #include directive")]
    ForbiddenInclude,
}

/// Validation error with source location.
///
/// # Examples
///
/// ```
/// use odcompile_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::ForbiddenInclude);
/// assert_eq!(err.kind, ValidationErrorKind::ForbiddenInclude);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific error condition
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
