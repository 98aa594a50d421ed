//! Discord integration for odcompile.
//!
//! - **client**: serenity client setup and lifecycle
//! - **handler**: `EventHandler` that routes messages to the dispatcher
//! - **sink**: a channel as a [`ReplySink`](crate::ReplySink), plus embed conversion
//!
//! Available with the `discord` feature.

mod client;
mod handler;
mod sink;

pub use client::OdCompileBot;
pub use handler::OdCompileHandler;
pub use sink::{ChannelSink, to_create_embed};
