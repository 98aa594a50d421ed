//! User-facing message text.

/// Maximum characters in a plain chat message.
pub const MESSAGE_LIMIT: usize = 2000;

/// Reply when no fenced or inline code block was found.
pub const NO_CODE_BLOCK: &str = "Your code has to be in a code block!";

/// Reply when the code contains an include directive.
pub const FORBIDDEN_INCLUDE: &str = "You can't have any `#include` statements in your code.";

/// Status shown while the listener works.
pub const COMPILING_STATUS: &str =
    "Compiling. If there have been any updates, this could take a moment....";

/// Reply when a listener URL is rejected.
pub const LISTENER_SET_FAILED: &str =
    "There was an error setting the listener's URL. Please check your entry and try again.";

/// Reply when a non-admin runs an admin command.
pub const NOT_PERMITTED: &str = "You are not allowed to change compiler settings.";

/// Confirmation echoing the stored listener URL.
pub fn listener_set_confirmation(url: &str) -> String {
    format!("Listener URL set to: {}", url)
}

/// Usage text for `compile-help`.
pub fn help_text(prefix: &str) -> String {
    format!(
        "**Compile and run DM code**\n\
         `{p}compile` compiles and runs DM code with the latest OpenDream and replies with the \
         compile log and anything the code printed. Compile errors are listed as reported by \
         OpenDream.\n\n\
         Short one-liners can use inline code:\n\
         {p}compile `world.log << \"Hello, World!\"`\n\n\
         Multi-line code goes in a code block:\n\
         {p}compile ```c\nworld.log << \"Hello,\"\nworld.log << \"World!\"\n```\n\
         If you use more than one proc, or your code needs indentation, define a \
         `/proc/main()` entry point.\n\n\
         **Arguments**\n\
         Extra compiler arguments go before the code block, e.g. `--version=123.456`.\n\
         `--no-parsing` returns the full execution output instead of the parsed version.\n\n\
         Use `{p}compile-debug` to compile with OpenDream's Debug build configuration.",
        p = prefix
    )
}
