//! Bot runner.

use odcompile_config::{ConfigStore, JsonConfigStore, OdCompileSettings, VersionWatcher};
use odcompile_error::{ConfigError, ConfigErrorKind, OdCompileResult};
use odcompile_relay::{CompileRelay, ListenerClient};
use odcompile_social::{CommandDispatcher, OdCompileBot};
use std::sync::Arc;
use tracing::{info, instrument};

/// Start the version watcher and run the Discord bot until it stops.
///
/// # Errors
///
/// Returns an error if no token is available, the store cannot be opened, or
/// the gateway connection fails.
#[instrument(skip_all)]
pub async fn run_bot(settings: &OdCompileSettings, token: Option<String>) -> OdCompileResult<()> {
    let token =
        token.ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingEnv("DISCORD_TOKEN".into())))?;

    let store: Arc<dyn ConfigStore> = Arc::new(
        JsonConfigStore::open(settings.store().path(), settings.listener().default_url()).await?,
    );
    info!(
        listener_url = %store.listener_url().await?,
        timeout_secs = settings.listener().timeout_secs(),
        "Listener configured"
    );

    let relay: Arc<dyn CompileRelay> =
        Arc::new(ListenerClient::new(store.clone(), settings.listener().timeout()));
    let dispatcher = Arc::new(CommandDispatcher::new(
        relay,
        store.clone(),
        settings.discord().admin_ids().iter().copied(),
        settings.discord().command_prefix().clone(),
    ));

    let watcher = VersionWatcher::new(store, settings.version_check().interval()).spawn();

    let mut bot = OdCompileBot::new(token, dispatcher).await?;
    let result = bot.start().await;
    watcher.abort();
    result?;

    Ok(())
}
