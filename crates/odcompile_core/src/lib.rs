//! Core types and input handling for odcompile.
//!
//! This crate turns free-form chat text into a validated [`CompileRequest`]
//! and defines the platform-neutral reply model the rest of the workspace
//! renders into:
//!
//! - [`normalize_input`] - split chat text into flags and a code body
//! - [`contains_forbidden_include`] - refuse `#include` before any network call
//! - [`CompileRequest`] / [`BuildConfig`] - what gets sent to the listener
//! - [`ResultEmbed`] / [`Reply`] - what gets sent back to the chat
//!
//! # Example
//!
//! ```
//! use odcompile_core::{BuildConfig, CompileRequest, normalize_input};
//!
//! let input = normalize_input("--version=515.1 `world.log << \"hi\"`");
//! let request = CompileRequest::from_input(&input, BuildConfig::Release).unwrap();
//! assert_eq!(request.code(), "world.log << \"hi\"");
//! assert_eq!(request.args(), &vec!["--version=515.1".to_string()]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod embed;
mod guard;
mod normalize;
mod request;

pub use embed::{
    EMBED_DESCRIPTION_LIMIT, EMBED_FIELD_LIMIT, EmbedColour, EmbedField, Reply, ResultEmbed,
    clip, code_block,
};
pub use guard::contains_forbidden_include;
pub use normalize::{KNOWN_FENCE_LANGUAGES, NO_PARSING_FLAG, NormalizedInput, normalize_input};
pub use request::{BuildConfig, CompileRequest};
