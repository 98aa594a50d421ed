//! Chat text normalization.
//!
//! Accepts the text that follows a compile command and extracts the compiler
//! flags written before the code marker plus the code body itself.

use derive_getters::Getters;
use tracing::{debug, instrument};

/// Flag that requests the raw execution transcript instead of the parsed one.
pub const NO_PARSING_FLAG: &str = "--no-parsing";

/// Language tags users commonly put after an opening code fence.
pub const KNOWN_FENCE_LANGUAGES: &[&str] = &[
    "ansi", "bash", "byond", "c", "c++", "cpp", "cs", "csharp", "dm", "dme", "go", "ini", "java",
    "javascript", "js", "json", "lua", "md", "php", "py", "python", "rb", "ruby", "rs", "rust",
    "sh", "text", "toml", "ts", "txt", "yaml",
];

const FENCE: &str = "```";

/// Result of splitting a chat submission.
///
/// `code` is `None` when no usable code block was present.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NormalizedInput {
    /// Extracted code body.
    code: Option<String>,
    /// Flags written before the code block, in order.
    args: Vec<String>,
    /// Whether the listener should parse the execution transcript.
    parsed: bool,
}

/// Split raw command text into flags and a code body.
///
/// # Examples
///
/// ```
/// use odcompile_core::normalize_input;
///
/// let input = normalize_input("--version=123.456 --no-parsing `world.log << 1`");
/// assert_eq!(input.args(), &vec!["--version=123.456".to_string()]);
/// assert!(!input.parsed());
/// assert_eq!(input.code().as_deref(), Some("world.log << 1"));
///
/// assert!(normalize_input("world.log << 1").code().is_none());
/// ```
#[instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn normalize_input(raw: &str) -> NormalizedInput {
    let (leading, body) = match raw.find('`') {
        Some(idx) => (&raw[..idx], Some(&raw[idx..])),
        None => (raw, None),
    };

    let mut parsed = true;
    let mut args = Vec::new();
    for token in leading.split_whitespace() {
        if token == NO_PARSING_FLAG {
            parsed = false;
        } else {
            args.push(token.to_string());
        }
    }

    let code = body.and_then(extract_code);
    debug!(has_code = code.is_some(), arg_count = args.len(), parsed, "Normalized input");

    NormalizedInput { code, args, parsed }
}

/// Take the first complete block from `body`, which starts at a backtick.
/// Anything after its closing marker is ignored.
fn extract_code(body: &str) -> Option<String> {
    let code = if let Some(after_open) = body.strip_prefix(FENCE) {
        let close = after_open.find(FENCE)?;
        clean_fenced(&after_open[..close])
    } else {
        let after_open = body.strip_prefix('`')?;
        let close = after_open.find('`')?;
        after_open[..close].trim().to_string()
    };

    if code.trim().is_empty() { None } else { Some(code) }
}

fn clean_fenced(inner: &str) -> String {
    let content = match inner.split_once('\n') {
        Some((first, rest)) if is_language_line(first) => rest,
        _ => inner,
    };
    dedent(content)
}

fn is_language_line(line: &str) -> bool {
    let tag = line.trim();
    if tag.is_empty() {
        return true;
    }
    !line.trim_end().contains(char::is_whitespace)
        && KNOWN_FENCE_LANGUAGES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(tag))
}

/// Drop surrounding blank lines and the indentation every line shares.
fn dedent(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);
    let lines = &lines[start..=end];
    let indent = common_indent(lines);

    lines
        .iter()
        .map(|&line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(indent).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut indents = lines
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .map(|l| &l[..l.len() - l.trim_start().len()]);

    let Some(first) = indents.next() else {
        return "";
    };

    indents.fold(first, |shared, indent| {
        let len = shared
            .char_indices()
            .zip(indent.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, c), _)| i + c.len_utf8());
        &shared[..len]
    })
}
