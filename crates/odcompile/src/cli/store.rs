//! Listener store commands.

use odcompile_config::{ConfigStore, JsonConfigStore, OdCompileSettings};
use odcompile_error::OdCompileResult;
use tracing::info;

async fn open_store(settings: &OdCompileSettings) -> OdCompileResult<JsonConfigStore> {
    let store =
        JsonConfigStore::open(settings.store().path(), settings.listener().default_url()).await?;
    Ok(store)
}

/// Store a listener URL and return the confirmation line.
///
/// # Errors
///
/// Returns an error if the URL is rejected or the store cannot be written.
pub async fn set_listener(settings: &OdCompileSettings, url: &str) -> OdCompileResult<String> {
    let store = open_store(settings).await?;
    let stored = store.set_listener_url(Some(url)).await?;
    info!(listener_url = %stored, path = %store.file_path().display(), "Listener URL updated");
    Ok(format!("Listener URL set to: {}", stored))
}

/// Describe the stored configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn show_config(settings: &OdCompileSettings) -> OdCompileResult<String> {
    let store = open_store(settings).await?;
    let listener_url = store.listener_url().await?;
    let version = store
        .config_version()
        .await?
        .unwrap_or_else(|| "not set".to_string());
    Ok(format!(
        "Store: {}\nListener URL: {}\nConfig version: {}",
        store.file_path().display(),
        listener_url,
        version
    ))
}
