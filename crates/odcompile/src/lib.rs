//! odcompile - compile and run DM code from Discord.
//!
//! The binary wires the workspace crates together:
//!
//! - [`odcompile_config`] loads settings and owns the listener URL store
//! - [`odcompile_relay`] talks to the OpenDream compile listener
//! - [`odcompile_social`] parses chat commands and runs the Discord bot
//!
//! This library half exposes the CLI definition and its handlers so they can
//! be exercised without a terminal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod observability;

pub use cli::{
    Cli, Commands, compile_file, compose_chat_input, run_bot, set_listener, show_config,
};
pub use observability::{ObservabilityConfig, init_observability};
