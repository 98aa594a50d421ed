//! Turn relay results into chat embeds.

use crate::{CompileOutcome, CompileReport, RelayResult};
use odcompile_core::{
    EMBED_DESCRIPTION_LIMIT, EMBED_FIELD_LIMIT, EmbedColour, ResultEmbed, code_block,
};
use odcompile_error::{RelayError, RelayErrorKind};

/// Title of the compile-error embed.
pub const COMPILE_FAILED_TITLE: &str = "Compilation failed";
/// Title of every embed for code that compiled.
pub const COMPILE_SUCCEEDED_TITLE: &str = "Compilation succeeded";
/// Notice shown when the code ran silently.
pub const NO_OUTPUT_NOTICE: &str = "Ran with no output.";
/// Title of the transport-failure embed.
pub const UNREACHABLE_TITLE: &str = "Could not reach the listener";
/// Field holding the compiler log.
pub const COMPILER_OUTPUT_FIELD: &str = "Compiler output";
/// Field holding the parsed execution transcript.
pub const EXECUTION_OUTPUT_FIELD: &str = "Execution output";
/// Field holding the raw execution transcript.
pub const RAW_EXECUTION_OUTPUT_FIELD: &str = "Raw execution output";

const SERVICE_FAULT_FOOTER: &str = "This is a problem with the compile service, not your code.";

/// Render a relayed compile.
///
/// # Examples
///
/// ```
/// use odcompile_core::BuildConfig;
/// use odcompile_relay::{COMPILE_FAILED_TITLE, CompileReport, CompileResult, render_report};
///
/// let result = CompileResult::new("unexpected token at line 3", "", false);
/// let report = CompileReport::from_result(result, true, BuildConfig::Release);
/// let embed = render_report(&report);
/// assert_eq!(embed.title(), COMPILE_FAILED_TITLE);
/// ```
pub fn render_report(report: &CompileReport) -> ResultEmbed {
    let embed = match report.outcome() {
        CompileOutcome::CompileFailed { compile_log } => {
            ResultEmbed::new(COMPILE_FAILED_TITLE, EmbedColour::Failure)
                .with_description(code_block(compile_log, EMBED_DESCRIPTION_LIMIT))
        }
        CompileOutcome::NoOutput { compile_log } => {
            ResultEmbed::new(COMPILE_SUCCEEDED_TITLE, EmbedColour::Warning)
                .with_description(NO_OUTPUT_NOTICE)
                .with_field(
                    COMPILER_OUTPUT_FIELD,
                    code_block(compile_log, EMBED_FIELD_LIMIT),
                    false,
                )
        }
        CompileOutcome::Output {
            compile_log,
            runtime_output,
            parsed,
        } => {
            let output_field = if *parsed {
                EXECUTION_OUTPUT_FIELD
            } else {
                RAW_EXECUTION_OUTPUT_FIELD
            };
            ResultEmbed::new(COMPILE_SUCCEEDED_TITLE, EmbedColour::Success)
                .with_field(
                    COMPILER_OUTPUT_FIELD,
                    code_block(compile_log, EMBED_FIELD_LIMIT),
                    false,
                )
                .with_field(
                    output_field,
                    code_block(runtime_output, EMBED_FIELD_LIMIT),
                    false,
                )
        }
    };

    let footer = match report.listener_version() {
        Some(version) => format!(
            "Compiled with OpenDream {} ({})",
            version,
            report.build_config()
        ),
        None => format!("Build configuration: {}", report.build_config()),
    };
    embed.with_footer(footer)
}

/// Render a transport failure.
///
/// Always distinct from a compile failure so users can tell a broken
/// snippet from a broken service.
pub fn render_failure(error: &RelayError) -> ResultEmbed {
    let reason = match &error.kind {
        RelayErrorKind::Timeout(_) => {
            "The listener did not respond in time. It may be busy or updating; try again shortly."
                .to_string()
        }
        RelayErrorKind::Connection(_) => "The listener could not be reached.".to_string(),
        RelayErrorKind::Status(code) => format!("The listener answered with HTTP {}.", code),
        RelayErrorKind::MalformedResponse(_) => {
            "The listener sent a response that could not be understood.".to_string()
        }
        RelayErrorKind::Configuration(_) => {
            "The listener URL could not be read from the bot's configuration.".to_string()
        }
    };

    ResultEmbed::new(UNREACHABLE_TITLE, EmbedColour::Failure)
        .with_description(format!("Could not complete the compile request. {}", reason))
        .with_footer(SERVICE_FAULT_FOOTER)
}

/// Render either side of a relay call.
pub fn render_relay_result(result: &RelayResult<CompileReport>) -> ResultEmbed {
    match result {
        Ok(report) => render_report(report),
        Err(error) => render_failure(error),
    }
}
