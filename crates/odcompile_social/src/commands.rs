//! Command parsing and dispatch.

use crate::messages::{
    COMPILING_STATUS, FORBIDDEN_INCLUDE, LISTENER_SET_FAILED, MESSAGE_LIMIT, NO_CODE_BLOCK,
    NOT_PERMITTED, help_text, listener_set_confirmation,
};
use crate::{ChatResult, ReplySink, SentMessage};
use odcompile_config::ConfigStore;
use odcompile_core::{BuildConfig, CompileRequest, Reply, ResultEmbed, clip, normalize_input};
use odcompile_error::ValidationErrorKind;
use odcompile_relay::{CompileRelay, render_relay_result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Release compile command.
pub const COMPILE_COMMAND: &str = "compile";
/// Debug compile command.
pub const COMPILE_DEBUG_COMMAND: &str = "compile-debug";
/// Usage command.
pub const COMPILE_HELP_COMMAND: &str = "compile-help";
/// Admin command group.
pub const ADMIN_GROUP: &str = "compileset";

const SET_LISTENER_SUBCOMMAND: &str = "set-listener";
const SHOW_SUBCOMMAND: &str = "show";

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Compile and run the input.
    Compile {
        /// Build configuration requested by the command name
        build_config: BuildConfig,
        /// Everything after the command word
        input: String,
    },
    /// Show usage.
    Help,
    /// Store a new listener URL.
    SetListener {
        /// URL argument, absent when the admin gave none
        url: Option<String>,
    },
    /// Show the stored configuration.
    ShowConfig,
    /// Admin group without a known subcommand.
    AdminUsage,
}

impl Invocation {
    /// Whether only admins may run this.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Invocation::SetListener { .. } | Invocation::ShowConfig | Invocation::AdminUsage
        )
    }
}

/// Recognise a command in a chat message.
///
/// The command word ends at the first whitespace or backtick, so
/// ``!compile`world.log << 1` `` is a compile command.
///
/// # Examples
///
/// ```
/// use odcompile_core::BuildConfig;
/// use odcompile_social::{Invocation, parse_invocation};
///
/// assert_eq!(
///     parse_invocation("!compile-debug `world.log << 1`", "!"),
///     Some(Invocation::Compile {
///         build_config: BuildConfig::Debug,
///         input: " `world.log << 1`".to_string(),
///     })
/// );
/// assert_eq!(parse_invocation("!compiler", "!"), None);
/// assert_eq!(parse_invocation("compile `x`", "!"), None);
/// ```
pub fn parse_invocation(content: &str, prefix: &str) -> Option<Invocation> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '`')
        .unwrap_or(rest.len());
    let (word, remainder) = rest.split_at(end);

    match word {
        COMPILE_COMMAND => Some(Invocation::Compile {
            build_config: BuildConfig::Release,
            input: remainder.to_string(),
        }),
        COMPILE_DEBUG_COMMAND => Some(Invocation::Compile {
            build_config: BuildConfig::Debug,
            input: remainder.to_string(),
        }),
        COMPILE_HELP_COMMAND => Some(Invocation::Help),
        ADMIN_GROUP => {
            let mut tokens = remainder.split_whitespace();
            match tokens.next() {
                Some(SET_LISTENER_SUBCOMMAND) => Some(Invocation::SetListener {
                    url: tokens.next().map(str::to_string),
                }),
                Some(SHOW_SUBCOMMAND) => Some(Invocation::ShowConfig),
                _ => Some(Invocation::AdminUsage),
            }
        }
        _ => None,
    }
}

/// Runs chat commands against the relay and the config store.
///
/// One dispatcher serves every channel; per-invocation state lives in the
/// [`ReplySink`] handed to each call.
#[derive(Clone)]
pub struct CommandDispatcher {
    relay: Arc<dyn CompileRelay>,
    store: Arc<dyn ConfigStore>,
    admins: HashSet<u64>,
    prefix: String,
}

impl CommandDispatcher {
    /// Create a dispatcher.
    pub fn new(
        relay: Arc<dyn CompileRelay>,
        store: Arc<dyn ConfigStore>,
        admins: impl IntoIterator<Item = u64>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            relay,
            store,
            admins: admins.into_iter().collect(),
            prefix: prefix.into(),
        }
    }

    /// Command prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Recognise a command using this dispatcher's prefix.
    pub fn parse(&self, content: &str) -> Option<Invocation> {
        parse_invocation(content, &self.prefix)
    }

    /// Whether `user_id` may run admin commands.
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admins.contains(&user_id)
    }

    /// Run one invocation on behalf of `author_id`.
    ///
    /// # Errors
    ///
    /// Returns the chat error when the final reply could not be delivered.
    #[instrument(skip(self, invocation, sink))]
    pub async fn dispatch(
        &self,
        invocation: Invocation,
        author_id: u64,
        sink: &dyn ReplySink,
    ) -> ChatResult<()> {
        if invocation.requires_admin() && !self.is_admin(author_id) {
            info!("Rejected admin command from non-admin");
            sink.send(Reply::text(NOT_PERMITTED)).await?;
            return Ok(());
        }

        match invocation {
            Invocation::Compile {
                build_config,
                input,
            } => self.compile(&input, build_config, sink).await,
            Invocation::Help => self.help(sink).await,
            Invocation::SetListener { url } => self.set_listener(url.as_deref(), sink).await,
            Invocation::ShowConfig => self.show_config(sink).await,
            Invocation::AdminUsage => {
                let usage = format!(
                    "Usage: `{p}{g} {s} <url>` or `{p}{g} {v}`",
                    p = self.prefix,
                    g = ADMIN_GROUP,
                    s = SET_LISTENER_SUBCOMMAND,
                    v = SHOW_SUBCOMMAND,
                );
                sink.send(Reply::text(usage)).await.map(|_| ())
            }
        }
    }

    /// Validate, relay and report one compile command.
    ///
    /// Rejected input gets its message and never reaches the relay. Once the
    /// status message is shown a result or failure embed is always attempted,
    /// and the status message is removed afterwards.
    ///
    /// # Errors
    ///
    /// Returns the chat error when neither the embed nor its plain-text
    /// fallback could be sent.
    #[instrument(skip(self, input, sink))]
    pub async fn compile(
        &self,
        input: &str,
        build_config: BuildConfig,
        sink: &dyn ReplySink,
    ) -> ChatResult<()> {
        let normalized = normalize_input(input);
        let request = match CompileRequest::from_input(&normalized, build_config) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Rejected compile input");
                let message = match e.kind {
                    ValidationErrorKind::MissingCode => NO_CODE_BLOCK,
                    ValidationErrorKind::ForbiddenInclude => FORBIDDEN_INCLUDE,
                };
                sink.send(Reply::text(message)).await?;
                return Ok(());
            }
        };

        let status = match sink.send(Reply::text(COMPILING_STATUS)).await {
            Ok(sent) => Some(sent),
            Err(e) => {
                warn!(error = %e, "Failed to post status message");
                None
            }
        };

        let result = self.relay.compile(&request, *normalized.parsed()).await;
        let embed = render_relay_result(&result);
        let delivered = self.deliver(embed, sink).await;

        if let Some(sent) = status {
            self.retract(sent, sink).await;
        }

        delivered
    }

    async fn deliver(&self, embed: ResultEmbed, sink: &dyn ReplySink) -> ChatResult<()> {
        let fallback = clip(&embed.to_plain_text(), MESSAGE_LIMIT);
        match sink.send(Reply::Embed(embed)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Embed rejected, sending plain text");
                sink.send(Reply::Text(fallback)).await.map(|_| ())
            }
        }
    }

    async fn retract(&self, sent: SentMessage, sink: &dyn ReplySink) {
        if let Err(e) = sink.delete(sent).await {
            warn!(error = %e, message = %sent, "Failed to delete status message");
        }
    }

    /// Store a listener URL and confirm it.
    ///
    /// # Errors
    ///
    /// Returns the chat error when the reply could not be sent.
    #[instrument(skip(self, sink))]
    pub async fn set_listener(&self, url: Option<&str>, sink: &dyn ReplySink) -> ChatResult<()> {
        let reply = match self.store.set_listener_url(url).await {
            Ok(stored) => {
                info!(listener_url = %stored, "Listener URL updated");
                listener_set_confirmation(&stored)
            }
            Err(e) => {
                warn!(error = %e, "Failed to set listener URL");
                LISTENER_SET_FAILED.to_string()
            }
        };
        sink.send(Reply::Text(reply)).await.map(|_| ())
    }

    /// Show the stored listener URL and schema marker.
    ///
    /// # Errors
    ///
    /// Returns the chat error when the reply could not be sent.
    pub async fn show_config(&self, sink: &dyn ReplySink) -> ChatResult<()> {
        let listener = self
            .store
            .listener_url()
            .await
            .unwrap_or_else(|e| format!("unavailable ({})", e.kind));
        let version = match self.store.config_version().await {
            Ok(Some(version)) => version,
            Ok(None) => "not set".to_string(),
            Err(e) => format!("unavailable ({})", e.kind),
        };
        let text = format!(
            "Listener URL: {}\nConfig version: {}",
            listener, version
        );
        sink.send(Reply::Text(text)).await.map(|_| ())
    }

    /// Send usage text.
    ///
    /// # Errors
    ///
    /// Returns the chat error when the reply could not be sent.
    pub async fn help(&self, sink: &dyn ReplySink) -> ChatResult<()> {
        sink.send(Reply::Text(help_text(&self.prefix)))
            .await
            .map(|_| ())
    }
}
