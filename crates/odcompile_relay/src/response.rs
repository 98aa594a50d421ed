//! Listener response types.

use derive_getters::Getters;
use odcompile_core::BuildConfig;
use serde::{Deserialize, Serialize};

/// Response body returned by the listener.
///
/// Unknown fields are ignored. `compile_log` and `succeeded` are required;
/// a body without them is treated as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CompileResult {
    /// Compiler diagnostics.
    compile_log: String,
    /// Execution transcript, parsed or raw depending on the request.
    #[serde(default, alias = "run_log")]
    runtime_output: String,
    /// Whether the listener parsed the transcript; absent means "as requested".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parsed: Option<bool>,
    /// Whether compilation succeeded.
    succeeded: bool,
    /// OpenDream build the listener compiled with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl CompileResult {
    /// Build a result, mainly for tests and stub listeners.
    pub fn new(
        compile_log: impl Into<String>,
        runtime_output: impl Into<String>,
        succeeded: bool,
    ) -> Self {
        Self {
            compile_log: compile_log.into(),
            runtime_output: runtime_output.into(),
            parsed: None,
            succeeded,
            version: None,
        }
    }

    /// Attach the listener's OpenDream version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Collapse the response into its three-way outcome.
    ///
    /// `requested_parsed` fills in for a listener that does not echo the flag.
    pub fn into_outcome(self, requested_parsed: bool) -> CompileOutcome {
        if !self.succeeded {
            return CompileOutcome::CompileFailed {
                compile_log: self.compile_log,
            };
        }
        if self.runtime_output.trim().is_empty() {
            return CompileOutcome::NoOutput {
                compile_log: self.compile_log,
            };
        }
        CompileOutcome::Output {
            compile_log: self.compile_log,
            runtime_output: self.runtime_output,
            parsed: self.parsed.unwrap_or(requested_parsed),
        }
    }
}

/// What happened to the submitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The compiler rejected the code.
    CompileFailed {
        /// Compiler diagnostics
        compile_log: String,
    },
    /// Compiled and ran, but printed nothing.
    NoOutput {
        /// Compiler diagnostics
        compile_log: String,
    },
    /// Compiled and ran with output.
    Output {
        /// Compiler diagnostics
        compile_log: String,
        /// Execution transcript
        runtime_output: String,
        /// Whether the transcript was parsed by the listener
        parsed: bool,
    },
}

impl CompileOutcome {
    /// Compiler diagnostics, present in every outcome.
    pub fn compile_log(&self) -> &str {
        match self {
            Self::CompileFailed { compile_log }
            | Self::NoOutput { compile_log }
            | Self::Output { compile_log, .. } => compile_log,
        }
    }
}

/// A relayed compile, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CompileReport {
    outcome: CompileOutcome,
    listener_version: Option<String>,
    build_config: BuildConfig,
}

impl CompileReport {
    /// Create a report.
    pub fn new(
        outcome: CompileOutcome,
        listener_version: Option<String>,
        build_config: BuildConfig,
    ) -> Self {
        Self {
            outcome,
            listener_version,
            build_config,
        }
    }

    /// Build a report from a listener response.
    pub fn from_result(
        result: CompileResult,
        requested_parsed: bool,
        build_config: BuildConfig,
    ) -> Self {
        let listener_version = result.version.clone();
        Self::new(
            result.into_outcome(requested_parsed),
            listener_version,
            build_config,
        )
    }
}
