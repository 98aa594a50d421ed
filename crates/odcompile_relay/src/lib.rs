//! Relay between the chat surface and the OpenDream compile listener.
//!
//! The listener is an external HTTP service that owns the compiler and the
//! execution sandbox. This crate sends it one request per compile command and
//! turns whatever comes back into a [`ResultEmbed`](odcompile_core::ResultEmbed):
//!
//! - [`CompileRelay`] - the seam the command surface depends on
//! - [`ListenerClient`] - the `reqwest` implementation with a bounded wait
//! - [`CompileResult`] / [`CompileOutcome`] - the wire response and its tagged form
//! - [`render_report`] / [`render_failure`] - embeds for results and transport errors
//!
//! # Example
//!
//! ```rust,no_run
//! use odcompile_config::MemoryConfigStore;
//! use odcompile_core::{BuildConfig, CompileRequest};
//! use odcompile_relay::{CompileRelay, ListenerClient, render_relay_result};
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryConfigStore::default());
//! let client = ListenerClient::new(store, Duration::from_secs(120));
//!
//! let request = CompileRequest::new("world.log << 1", vec![], BuildConfig::Release)?;
//! let result = client.compile(&request, true).await;
//! println!("{}", render_relay_result(&result).to_plain_text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod render;
mod response;

pub use client::{COMPILE_PATH, CompileRelay, ListenerClient, RelayResult};
pub use render::{
    COMPILE_FAILED_TITLE, COMPILE_SUCCEEDED_TITLE, COMPILER_OUTPUT_FIELD, EXECUTION_OUTPUT_FIELD,
    NO_OUTPUT_NOTICE, RAW_EXECUTION_OUTPUT_FIELD, UNREACHABLE_TITLE, render_failure,
    render_relay_result, render_report,
};
pub use response::{CompileOutcome, CompileReport, CompileResult};
