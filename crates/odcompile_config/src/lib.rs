//! Configuration for odcompile.
//!
//! Two kinds of configuration live here:
//!
//! - **Runtime state** behind the [`ConfigStore`] trait: the listener base URL
//!   and the config schema marker. It is injected wherever it is read, so
//!   tests substitute [`MemoryConfigStore`] and deployments use
//!   [`JsonConfigStore`].
//! - **Static settings** in [`OdCompileSettings`], loaded once at startup from
//!   bundled defaults, user TOML files and the environment.
//!
//! [`VersionWatcher`] is the low-cadence background check that keeps the
//! schema marker current.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;
mod store;
mod version;

pub use settings::{
    DiscordSettings, ListenerSettings, OdCompileSettings, StoreSettings, VersionCheckSettings,
};
pub use store::{
    ConfigResult, ConfigStore, DEFAULT_LISTENER_URL, JsonConfigStore, MemoryConfigStore,
    PluginConfig, normalize_listener_url,
};
pub use version::{CONFIG_SCHEMA_VERSION, VersionWatcher};
