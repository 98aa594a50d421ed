//! Pre-flight checks run before a request leaves the bot.

use regex::Regex;
use std::sync::LazyLock;

/// `#include`, with optional spaces or tabs after the `#`.
static INCLUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[ \t]*include").expect("Valid include regex"));

/// Whether the code body contains an `#include` directive.
///
/// The listener resolves includes against a shared filesystem, so any
/// occurrence is refused outright. `#` followed by spaces or tabs and then
/// `include` counts too.
///
/// # Examples
///
/// ```
/// use odcompile_core::contains_forbidden_include;
///
/// assert!(contains_forbidden_include("#include \"secrets.dm\""));
/// assert!(contains_forbidden_include("# include <x>"));
/// assert!(!contains_forbidden_include("#INCLUDE nope"));
/// assert!(!contains_forbidden_include("world.log << \"include\""));
/// ```
pub fn contains_forbidden_include(code: &str) -> bool {
    INCLUDE_PATTERN.is_match(code)
}
