//! Serenity event handler for the compile bot.

use super::ChannelSink;
use crate::{CommandDispatcher, Invocation};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes chat messages to the [`CommandDispatcher`].
pub struct OdCompileHandler {
    dispatcher: Arc<CommandDispatcher>,
}

impl OdCompileHandler {
    /// Create a handler around a dispatcher.
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Required gateway intents for the bot.
    ///
    /// Prefix commands need message content in both guilds and DMs.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for OdCompileHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(invocation) = self.dispatcher.parse(&msg.content) else {
            return;
        };
        debug!(
            channel_id = %msg.channel_id,
            author_id = %msg.author.id,
            ?invocation,
            "Received command"
        );

        let sink = ChannelSink::new(ctx.http.clone(), msg.channel_id);

        // Typing stops when the guard drops.
        let _typing = matches!(invocation, Invocation::Compile { .. })
            .then(|| msg.channel_id.start_typing(&ctx.http));

        if let Err(e) = self
            .dispatcher
            .dispatch(invocation, msg.author.id.get(), &sink)
            .await
        {
            warn!(error = %e, channel_id = %msg.channel_id, "Failed to reply to command");
        }
    }
}
