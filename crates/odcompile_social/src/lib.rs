//! Chat command surface for odcompile.
//!
//! The command logic is platform-agnostic: [`CommandDispatcher`] talks to the
//! chat only through the [`ReplySink`] trait ("send text or an embed, delete a
//! message I sent"), which keeps it testable without a gateway connection.
//!
//! # Commands
//!
//! - `compile <args?> <code-block>` - compile with the Release build
//! - `compile-debug <args?> <code-block>` - compile with the Debug build
//! - `compile-help` - usage
//! - `compileset set-listener <url>` - admin only, set the listener base URL
//! - `compileset show` - admin only, show the stored configuration
//!
//! # Platform Support
//!
//! - `discord` - serenity-based bot (requires `discord` feature)

#![warn(missing_docs)]

mod commands;
mod messages;
mod sink;

#[cfg(feature = "discord")]
mod discord;

pub use commands::{
    ADMIN_GROUP, COMPILE_COMMAND, COMPILE_DEBUG_COMMAND, COMPILE_HELP_COMMAND, CommandDispatcher,
    Invocation, parse_invocation,
};
pub use messages::{
    COMPILING_STATUS, FORBIDDEN_INCLUDE, LISTENER_SET_FAILED, MESSAGE_LIMIT, NO_CODE_BLOCK,
    NOT_PERMITTED, help_text, listener_set_confirmation,
};
pub use sink::{ChatResult, ReplySink, SentMessage};

#[cfg(feature = "discord")]
pub use discord::{ChannelSink, OdCompileBot, OdCompileHandler, to_create_embed};
