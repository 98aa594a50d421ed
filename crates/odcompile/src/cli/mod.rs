//! Command-line interface module.
//!
//! CLI structure and command handlers for the odcompile binary.

mod commands;
mod compile;
mod run;
mod store;

pub use commands::{Cli, Commands};
pub use compile::{compile_file, compose_chat_input};
pub use run::run_bot;
pub use store::{set_listener, show_config};
