use odcompile_core::{BuildConfig, EMBED_FIELD_LIMIT, EmbedColour};
use odcompile_error::{RelayError, RelayErrorKind};
use odcompile_relay::{
    COMPILE_FAILED_TITLE, COMPILE_SUCCEEDED_TITLE, COMPILER_OUTPUT_FIELD, CompileReport,
    CompileResult, EXECUTION_OUTPUT_FIELD, NO_OUTPUT_NOTICE, RAW_EXECUTION_OUTPUT_FIELD,
    UNREACHABLE_TITLE, render_failure, render_report,
};

fn report(result: CompileResult, parsed: bool) -> CompileReport {
    CompileReport::from_result(result, parsed, BuildConfig::Release)
}

#[test]
fn compile_failure_shows_diagnostic_and_no_runtime_section() {
    let result = CompileResult::new("unexpected token at line 3", "should not appear", false);
    let embed = render_report(&report(result, true));

    assert_eq!(embed.title(), COMPILE_FAILED_TITLE);
    assert_eq!(*embed.colour(), EmbedColour::Failure);
    let text = embed.to_plain_text();
    assert!(text.contains("unexpected token at line 3"));
    assert!(!text.contains("should not appear"));
    assert!(embed.field(EXECUTION_OUTPUT_FIELD).is_none());
    assert!(embed.field(RAW_EXECUTION_OUTPUT_FIELD).is_none());
}

#[test]
fn silent_run_shows_notice_and_compile_log() {
    let embed = render_report(&report(CompileResult::new("0 errors", "", true), true));

    assert_eq!(embed.title(), COMPILE_SUCCEEDED_TITLE);
    assert_eq!(embed.description().as_deref(), Some(NO_OUTPUT_NOTICE));
    assert!(
        embed
            .field(COMPILER_OUTPUT_FIELD)
            .unwrap()
            .value()
            .contains("0 errors")
    );
    assert!(embed.field(EXECUTION_OUTPUT_FIELD).is_none());
}

#[test]
fn output_field_name_follows_parsed_flag() {
    let parsed = render_report(&report(CompileResult::new("ok", "Hello", true), true));
    assert!(parsed.field(EXECUTION_OUTPUT_FIELD).unwrap().value().contains("Hello"));

    let raw = render_report(&report(CompileResult::new("ok", "Hello", true), false));
    assert!(raw.field(RAW_EXECUTION_OUTPUT_FIELD).is_some());
    assert!(raw.field(EXECUTION_OUTPUT_FIELD).is_none());
}

#[test]
fn oversized_output_is_truncated_with_marker() {
    let huge = "line\n".repeat(2_000);
    let embed = render_report(&report(CompileResult::new("ok", huge, true), true));

    let value = embed.field(EXECUTION_OUTPUT_FIELD).unwrap().value();
    assert!(value.chars().count() <= EMBED_FIELD_LIMIT);
    assert!(value.contains("(truncated)"));
    assert!(value.starts_with("```") && value.ends_with("```"));
}

#[test]
fn footer_names_version_and_build() {
    let result = CompileResult::new("ok", "Hi", true).with_version("0.2.0");
    let embed = render_report(&CompileReport::from_result(result, true, BuildConfig::Debug));
    assert_eq!(
        embed.footer().as_deref(),
        Some("Compiled with OpenDream 0.2.0 (Debug)")
    );

    let embed = render_report(&report(CompileResult::new("ok", "Hi", true), true));
    assert_eq!(embed.footer().as_deref(), Some("Build configuration: Release"));
}

#[test]
fn transport_failures_share_one_title() {
    let kinds = [
        RelayErrorKind::Timeout(1000),
        RelayErrorKind::Connection("refused".into()),
        RelayErrorKind::Status(502),
        RelayErrorKind::MalformedResponse("missing field".into()),
    ];
    for kind in kinds {
        let embed = render_failure(&RelayError::new(kind));
        assert_eq!(embed.title(), UNREACHABLE_TITLE);
        assert_ne!(embed.title(), COMPILE_FAILED_TITLE);
        assert!(
            embed
                .description()
                .as_deref()
                .unwrap()
                .starts_with("Could not complete the compile request.")
        );
    }
}
