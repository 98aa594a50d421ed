//! Error types for odcompile.
//!
//! This crate provides the error types shared by every odcompile crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The categories map onto how the bot recovers:
//! - [`ValidationError`] - user input problems, answered with a specific chat message
//! - [`ConfigError`] - listener URL and settings problems
//! - [`RelayError`] - the listener could not be reached or understood
//! - [`ChatError`] - the chat platform rejected a send or delete
//!
//! # Examples
//!
//! ```
//! use odcompile_error::{OdCompileResult, RelayError, RelayErrorKind};
//!
//! fn reach_listener() -> OdCompileResult<String> {
//!     Err(RelayError::new(RelayErrorKind::Connection("connection refused".into())))?
//! }
//!
//! match reach_listener() {
//!     Ok(body) => println!("Got: {}", body),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod config;
mod error;
mod relay;
mod validation;

pub use chat::{ChatError, ChatErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{OdCompileError, OdCompileErrorKind, OdCompileResult};
pub use relay::{RelayError, RelayErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
