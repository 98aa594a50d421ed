//! Listener URL and schema marker storage.

use async_trait::async_trait;
use odcompile_error::{ConfigError, ConfigErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use url::Url;

/// Listener used until an operator sets one.
pub const DEFAULT_LISTENER_URL: &str = "http://localhost:5000";

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The persisted configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Listener base URL, never with a trailing `/`.
    pub listener_url: String,
    /// Last config schema marker seen by the version watcher.
    #[serde(default)]
    pub config_version: Option<String>,
}

impl PluginConfig {
    /// Record pointing at the given listener with no schema marker.
    pub fn with_listener(listener_url: impl Into<String>) -> Self {
        Self {
            listener_url: listener_url.into(),
            config_version: None,
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::with_listener(DEFAULT_LISTENER_URL)
    }
}

/// Get/set access to the process-wide configuration record.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current listener base URL.
    async fn listener_url(&self) -> ConfigResult<String>;

    /// Normalize and store a listener base URL, returning the stored value.
    ///
    /// # Errors
    ///
    /// Fails when the input is absent or not an absolute http(s) URL, or when
    /// the record cannot be persisted.
    async fn set_listener_url(&self, url: Option<&str>) -> ConfigResult<String>;

    /// Last stored config schema marker.
    async fn config_version(&self) -> ConfigResult<Option<String>>;

    /// Store a config schema marker.
    async fn set_config_version(&self, version: &str) -> ConfigResult<()>;
}

/// Validate a listener base URL and strip trailing separators.
///
/// # Examples
///
/// ```
/// use odcompile_config::normalize_listener_url;
///
/// assert_eq!(
///     normalize_listener_url(Some("http://example.com/")).unwrap(),
///     "http://example.com"
/// );
/// assert!(normalize_listener_url(None).is_err());
/// assert!(normalize_listener_url(Some("not a url")).is_err());
/// ```
#[track_caller]
pub fn normalize_listener_url(input: Option<&str>) -> ConfigResult<String> {
    let raw = input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingListenerUrl))?;

    let invalid = |reason: String| {
        ConfigError::new(ConfigErrorKind::InvalidListenerUrl {
            url: raw.to_string(),
            reason,
        })
    };

    let trimmed = raw.trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }

    Ok(trimmed.to_string())
}

/// In-process store, used by tests and one-off CLI invocations.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    state: RwLock<PluginConfig>,
}

impl MemoryConfigStore {
    /// Create a store holding the given record.
    pub fn new(config: PluginConfig) -> Self {
        Self {
            state: RwLock::new(config),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn listener_url(&self) -> ConfigResult<String> {
        Ok(self.state.read().await.listener_url.clone())
    }

    #[instrument(skip(self))]
    async fn set_listener_url(&self, url: Option<&str>) -> ConfigResult<String> {
        let url = normalize_listener_url(url)?;
        self.state.write().await.listener_url = url.clone();
        debug!(%url, "Listener URL updated");
        Ok(url)
    }

    async fn config_version(&self) -> ConfigResult<Option<String>> {
        Ok(self.state.read().await.config_version.clone())
    }

    async fn set_config_version(&self, version: &str) -> ConfigResult<()> {
        self.state.write().await.config_version = Some(version.to_string());
        Ok(())
    }
}

/// Store persisted as a pretty-printed JSON file.
///
/// Every read goes to the file and every change is a read-modify-write of
/// it, so writes from another process show up on the next call. Writes land
/// in a sibling `.tmp` file that is renamed into place.
#[derive(Debug)]
pub struct JsonConfigStore {
    file_path: PathBuf,
    default_listener_url: String,
    lock: RwLock<()>,
}

impl JsonConfigStore {
    /// Open the store at `file_path`. Until the file exists, reads report
    /// `default_listener_url`.
    ///
    /// # Errors
    ///
    /// Fails when the default URL is invalid or an existing file cannot be
    /// read or parsed.
    #[instrument(skip(file_path), fields(path = %file_path.as_ref().display()))]
    pub async fn open(
        file_path: impl AsRef<Path>,
        default_listener_url: &str,
    ) -> ConfigResult<Self> {
        let store = Self {
            file_path: file_path.as_ref().to_path_buf(),
            default_listener_url: normalize_listener_url(Some(default_listener_url))?,
            lock: RwLock::new(()),
        };
        store.load().await?;
        Ok(store)
    }

    /// Location of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn load(&self) -> ConfigResult<PluginConfig> {
        if !tokio::fs::try_exists(&self.file_path)
            .await
            .map_err(io_error)?
        {
            debug!("No config store file yet, using defaults");
            return Ok(PluginConfig::with_listener(self.default_listener_url.clone()));
        }

        let json = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(io_error)?;
        serde_json::from_str(&json).map_err(|e| {
            ConfigError::new(ConfigErrorKind::StoreFormat(format!(
                "{}: {}",
                self.file_path.display(),
                e
            )))
        })
    }

    async fn persist(&self, config: &PluginConfig) -> ConfigResult<()> {
        debug!(path = ?self.file_path, "Saving config store");
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::new(ConfigErrorKind::StoreFormat(e.to_string())))?;

        let mut staging = self.file_path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        tokio::fs::write(&staging, json).await.map_err(io_error)?;
        tokio::fs::rename(&staging, &self.file_path)
            .await
            .map_err(io_error)?;
        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut PluginConfig)) -> ConfigResult<()> {
        let _guard = self.lock.write().await;
        let mut config = self.load().await?;
        apply(&mut config);
        self.persist(&config).await
    }

    async fn read(&self) -> ConfigResult<PluginConfig> {
        let _guard = self.lock.read().await;
        self.load().await
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn listener_url(&self) -> ConfigResult<String> {
        Ok(self.read().await?.listener_url)
    }

    #[instrument(skip(self))]
    async fn set_listener_url(&self, url: Option<&str>) -> ConfigResult<String> {
        let url = normalize_listener_url(url)?;
        let stored = url.clone();
        self.update(move |config| config.listener_url = stored).await?;
        info!(%url, "Listener URL updated");
        Ok(url)
    }

    async fn config_version(&self) -> ConfigResult<Option<String>> {
        Ok(self.read().await?.config_version)
    }

    #[instrument(skip(self))]
    async fn set_config_version(&self, version: &str) -> ConfigResult<()> {
        let version = version.to_string();
        self.update(move |config| config.config_version = Some(version))
            .await
    }
}

#[track_caller]
fn io_error(err: std::io::Error) -> ConfigError {
    ConfigError::new(ConfigErrorKind::StoreIo(err.to_string()))
}
