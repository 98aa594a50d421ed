//! Static application settings.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use odcompile_error::{ConfigError, ConfigErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::ConfigResult;

/// Bundled default configuration.
const DEFAULT_SETTINGS: &str = include_str!("../odcompile.toml");

/// Longest version check interval, one year.
const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Chat surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct DiscordSettings {
    /// Prefix that introduces a command, e.g. `!` for `!compile`.
    #[serde(default = "default_command_prefix")]
    command_prefix: String,
    /// Users allowed to run `compileset` commands.
    #[serde(default)]
    admin_ids: Vec<u64>,
}

/// Listener connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ListenerSettings {
    /// Listener URL used to seed a fresh store.
    #[serde(default = "default_listener_url")]
    default_url: String,
    /// Upper bound on a single compile round trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl ListenerSettings {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Config store location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct StoreSettings {
    /// Path of the JSON record.
    #[serde(default = "default_store_path")]
    path: PathBuf,
}

/// Version watcher cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct VersionCheckSettings {
    /// Hours between checks.
    #[serde(default = "default_interval_hours")]
    interval_hours: u64,
}

impl VersionCheckSettings {
    /// Check interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }
}

/// Top-level odcompile settings.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults (`odcompile.toml` shipped with the crate)
/// 2. `~/.config/odcompile/odcompile.toml`
/// 3. `./odcompile.toml`, or the explicit path given to [`OdCompileSettings::load`]
/// 4. `ODCOMPILE__SECTION__KEY` environment variables
///
/// # Example
///
/// ```no_run
/// use odcompile_config::OdCompileSettings;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = OdCompileSettings::load(None)?;
/// println!("prefix: {}", settings.discord().command_prefix());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct OdCompileSettings {
    /// Chat surface settings
    discord: DiscordSettings,
    /// Listener settings
    listener: ListenerSettings,
    /// Store settings
    store: StoreSettings,
    /// Version watcher settings
    version_check: VersionCheckSettings,
}

impl OdCompileSettings {
    /// Load settings from a single TOML file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        debug!("Loading settings from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::build(builder)
    }

    /// Load settings with the full precedence chain.
    ///
    /// `explicit` replaces the `./odcompile.toml` lookup and must exist.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        debug!("Loading settings with precedence: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/odcompile/odcompile.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("odcompile").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("ODCOMPILE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("discord.admin_ids"),
        );

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ConfigError::new(ConfigErrorKind::Settings(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize::<Self>()
            .map_err(|e| {
                ConfigError::new(ConfigErrorKind::Settings(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?
            .validate()
    }

    /// Reject values that load fine but cannot run.
    fn validate(self) -> ConfigResult<Self> {
        if self.listener.timeout_secs == 0 {
            return Err(ConfigError::new(ConfigErrorKind::Settings(
                "listener.timeout_secs must be at least 1".to_string(),
            )));
        }
        if !(1..=MAX_INTERVAL_HOURS).contains(&self.version_check.interval_hours) {
            return Err(ConfigError::new(ConfigErrorKind::Settings(format!(
                "version_check.interval_hours must be between 1 and {}, got {}",
                MAX_INTERVAL_HOURS, self.version_check.interval_hours
            ))));
        }
        Ok(self)
    }
}

impl Default for OdCompileSettings {
    fn default() -> Self {
        Self {
            discord: DiscordSettings {
                command_prefix: default_command_prefix(),
                admin_ids: Vec::new(),
            },
            listener: ListenerSettings {
                default_url: default_listener_url(),
                timeout_secs: default_timeout_secs(),
            },
            store: StoreSettings {
                path: default_store_path(),
            },
            version_check: VersionCheckSettings {
                interval_hours: default_interval_hours(),
            },
        }
    }
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_listener_url() -> String {
    crate::DEFAULT_LISTENER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_store_path() -> PathBuf {
    PathBuf::from("odcompile-state.json")
}

fn default_interval_hours() -> u64 {
    24
}
