//! Compile request model.

use crate::{NormalizedInput, contains_forbidden_include};
use derive_getters::Getters;
use odcompile_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// OpenDream build configuration passed through to the listener.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum BuildConfig {
    /// Optimized build (default).
    #[default]
    Release,
    /// Debug build.
    Debug,
}

/// A validated compile request.
///
/// The code body is never empty and never contains an `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CompileRequest {
    /// DM source to compile.
    code: String,
    /// Extra compiler flags, forwarded unvalidated.
    args: Vec<String>,
    /// Requested build configuration.
    build_config: BuildConfig,
}

impl CompileRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the code is blank or contains an
    /// include directive.
    #[track_caller]
    pub fn new(
        code: impl Into<String>,
        args: Vec<String>,
        build_config: BuildConfig,
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingCode));
        }
        if contains_forbidden_include(&code) {
            return Err(ValidationError::new(ValidationErrorKind::ForbiddenInclude));
        }
        Ok(Self {
            code,
            args,
            build_config,
        })
    }

    /// Build a request from normalized chat input.
    #[track_caller]
    pub fn from_input(
        input: &NormalizedInput,
        build_config: BuildConfig,
    ) -> Result<Self, ValidationError> {
        let code = input
            .code()
            .as_deref()
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingCode))?;
        Self::new(code, input.args().clone(), build_config)
    }
}
