use odcompile_core::{BuildConfig, CompileRequest, normalize_input};
use odcompile_error::ValidationErrorKind;

#[test]
fn text_without_code_markers_has_no_code() {
    for raw in ["", "   ", "world.log << 1", "--version=1 hello world"] {
        let input = normalize_input(raw);
        assert!(input.code().is_none(), "expected no code for {raw:?}");
    }
}

#[test]
fn flags_are_split_and_no_parsing_extracted() {
    let input = normalize_input("--version=123.456 --no-parsing `world.log << 1`");
    assert_eq!(input.args(), &vec!["--version=123.456".to_string()]);
    assert!(!*input.parsed());

    let input = normalize_input("--version=123.456 `world.log << 1`");
    assert_eq!(input.args(), &vec!["--version=123.456".to_string()]);
    assert!(*input.parsed());
}

#[test]
fn flag_order_is_preserved_and_odd_tokens_pass_through() {
    let input = normalize_input("--b=2 -x --a `x`");
    assert_eq!(
        input.args(),
        &vec!["--b=2".to_string(), "-x".to_string(), "--a".to_string()]
    );
}

#[test]
fn inline_code_is_unwrapped() {
    let input = normalize_input("`world.log << \"Hello, World!\"`");
    assert_eq!(
        input.code().as_deref(),
        Some("world.log << \"Hello, World!\"")
    );
    assert!(input.args().is_empty());
}

#[test]
fn fenced_block_strips_language_tag() {
    let raw = "```c\nworld.log << 'Hello,'\nworld.log << \"World!\"\n```";
    let input = normalize_input(raw);
    assert_eq!(
        input.code().as_deref(),
        Some("world.log << 'Hello,'\nworld.log << \"World!\"")
    );
}

#[test]
fn fenced_block_keeps_unknown_first_line() {
    let raw = "```/proc/main()\n\tworld.log << 1\n```";
    let input = normalize_input(raw);
    assert_eq!(
        input.code().as_deref(),
        Some("/proc/main()\n\tworld.log << 1")
    );
}

#[test]
fn fenced_block_keeps_first_line_with_whitespace() {
    let raw = "```world.log << 1\nworld.log << 2```";
    let input = normalize_input(raw);
    assert_eq!(
        input.code().as_deref(),
        Some("world.log << 1\nworld.log << 2")
    );
}

#[test]
fn fenced_block_removes_shared_indentation() {
    let raw = "```dm\n    /proc/main()\n        world.log << 1\n\n    /proc/other()\n```";
    let input = normalize_input(raw);
    assert_eq!(
        input.code().as_deref(),
        Some("/proc/main()\n    world.log << 1\n\n/proc/other()")
    );
}

#[test]
fn empty_blocks_count_as_missing_code() {
    assert!(normalize_input("``````").code().is_none());
    assert!(normalize_input("```dm\n\n```").code().is_none());
    assert!(normalize_input("` `").code().is_none());
}

#[test]
fn request_from_missing_code_is_rejected() {
    let input = normalize_input("--flag only");
    let err = CompileRequest::from_input(&input, BuildConfig::Release).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::MissingCode);
}

#[test]
fn request_carries_build_config() {
    let input = normalize_input("`world.log << 1`");
    let request = CompileRequest::from_input(&input, BuildConfig::Debug).unwrap();
    assert_eq!(*request.build_config(), BuildConfig::Debug);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["build_config"], "Debug");
    assert_eq!(json["code"], "world.log << 1");
}

#[test]
fn text_after_closing_marker_is_ignored() {
    let input = normalize_input("```dm\nworld.log << 1\n``` pls");
    assert_eq!(input.code().as_deref(), Some("world.log << 1"));

    let input = normalize_input("`world.log << 1` thanks");
    assert_eq!(input.code().as_deref(), Some("world.log << 1"));
}

#[test]
fn only_first_inline_span_is_taken() {
    let input = normalize_input("`a` and `b`");
    assert_eq!(input.code().as_deref(), Some("a"));
}

#[test]
fn fenced_body_may_contain_single_backticks() {
    let input = normalize_input("```\nworld.log << \"`x`\"\n``` and `y`");
    assert_eq!(input.code().as_deref(), Some("world.log << \"`x`\""));
}

#[test]
fn unclosed_markers_have_no_code() {
    assert!(normalize_input("```dm\nworld.log << 1").code().is_none());
    assert!(normalize_input("`world.log << 1").code().is_none());
}
