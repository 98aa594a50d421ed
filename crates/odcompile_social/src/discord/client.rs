//! Discord bot client setup and lifecycle management.

use super::OdCompileHandler;
use crate::{ChatResult, CommandDispatcher};
use odcompile_error::{ChatError, ChatErrorKind};
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// The compile bot's serenity client.
///
/// # Example
/// ```no_run
/// # use odcompile_social::{CommandDispatcher, OdCompileBot};
/// # use std::sync::Arc;
/// # async fn run(dispatcher: Arc<CommandDispatcher>) -> Result<(), Box<dyn std::error::Error>> {
/// let token = std::env::var("DISCORD_TOKEN")?;
/// let mut bot = OdCompileBot::new(token, dispatcher).await?;
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct OdCompileBot {
    client: Client,
}

impl OdCompileBot {
    /// Build the client.
    ///
    /// # Errors
    /// Returns an error if the token is rejected or the client fails to
    /// initialize.
    #[instrument(skip(token, dispatcher), fields(token_len = token.len()))]
    pub async fn new(token: String, dispatcher: Arc<CommandDispatcher>) -> ChatResult<Self> {
        info!("Initializing odcompile Discord bot");

        let handler = OdCompileHandler::new(dispatcher);
        let intents = OdCompileHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                ChatError::new(ChatErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Run until the gateway connection ends.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> ChatResult<()> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            ChatError::new(ChatErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
