//! Channel-backed reply sink.

use crate::{ChatResult, ReplySink, SentMessage};
use async_trait::async_trait;
use odcompile_core::{Reply, ResultEmbed};
use odcompile_error::{ChatError, ChatErrorKind};
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tracing::debug;

/// Convert a result embed to serenity's builder.
pub fn to_create_embed(embed: &ResultEmbed) -> CreateEmbed {
    let mut out = CreateEmbed::new()
        .title(embed.title())
        .colour(embed.colour().rgb());
    if let Some(description) = embed.description() {
        out = out.description(description);
    }
    for field in embed.fields() {
        out = out.field(field.name(), field.value(), *field.inline());
    }
    if let Some(footer) = embed.footer() {
        out = out.footer(CreateEmbedFooter::new(footer));
    }
    out
}

/// Replies into the channel a command came from.
#[derive(Clone)]
pub struct ChannelSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelSink {
    /// Sink for `channel_id`.
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ReplySink for ChannelSink {
    async fn send(&self, reply: Reply) -> ChatResult<SentMessage> {
        let message = match reply {
            Reply::Text(text) => CreateMessage::new().content(text),
            Reply::Embed(embed) => CreateMessage::new().embed(to_create_embed(&embed)),
        };
        let sent = self
            .channel_id
            .send_message(&self.http, message)
            .await
            .map_err(|e| ChatError::new(ChatErrorKind::MessageSendFailed(e.to_string())))?;
        debug!(channel_id = %self.channel_id, message_id = %sent.id, "Message sent");
        Ok(SentMessage(sent.id.get()))
    }

    async fn delete(&self, message: SentMessage) -> ChatResult<()> {
        self.channel_id
            .delete_message(&self.http, MessageId::new(message.0))
            .await
            .map_err(|e| ChatError::new(ChatErrorKind::MessageDeleteFailed(e.to_string())))
    }
}
