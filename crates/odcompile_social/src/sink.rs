//! Outbound side of the chat platform.

use async_trait::async_trait;
use odcompile_core::Reply;
use odcompile_error::ChatError;

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Handle of a message the bot sent, used to delete it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", _0)]
pub struct SentMessage(
    /// Platform message id.
    pub u64,
);

/// Where replies to one invocation go.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send a reply.
    async fn send(&self, reply: Reply) -> ChatResult<SentMessage>;

    /// Delete a message previously returned by [`ReplySink::send`].
    async fn delete(&self, message: SentMessage) -> ChatResult<()>;
}
