//! Local compile command.

use odcompile_config::{ConfigStore, JsonConfigStore, OdCompileSettings};
use odcompile_core::{BuildConfig, CompileRequest, NO_PARSING_FLAG, normalize_input};
use odcompile_error::OdCompileResult;
use odcompile_relay::{CompileRelay, ListenerClient, render_failure, render_report};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Phrase a source file the way a chat user would: arguments, then a fenced
/// block.
///
/// # Examples
///
/// ```
/// use odcompile::compose_chat_input;
///
/// let input = compose_chat_input("world.log << 1", &["--version=515.1".into()], true);
/// assert_eq!(input, "--version=515.1 --no-parsing ```\nworld.log << 1\n```");
/// ```
pub fn compose_chat_input(code: &str, args: &[String], no_parsing: bool) -> String {
    let mut words: Vec<&str> = args.iter().map(String::as_str).collect();
    if no_parsing {
        words.push(NO_PARSING_FLAG);
    }
    let code = code.trim_end_matches(['\n', '\r']);
    if words.is_empty() {
        format!("```\n{}\n```", code)
    } else {
        format!("{} ```\n{}\n```", words.join(" "), code)
    }
}

/// Compile a local file through the chat pipeline and return the rendered
/// result as plain text.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the code is rejected, or the
/// listener cannot be reached. A failed compile is a successful call.
#[instrument(skip(settings, args, debug), fields(file = %file.display()))]
pub async fn compile_file(
    settings: &OdCompileSettings,
    file: &Path,
    debug: bool,
    no_parsing: bool,
    args: &[String],
) -> OdCompileResult<String> {
    let source = tokio::fs::read_to_string(file).await?;
    let normalized = normalize_input(&compose_chat_input(&source, args, no_parsing));

    let build_config = if debug {
        BuildConfig::Debug
    } else {
        BuildConfig::Release
    };
    let request = CompileRequest::from_input(&normalized, build_config)?;

    let store: Arc<dyn ConfigStore> = Arc::new(
        JsonConfigStore::open(settings.store().path(), settings.listener().default_url()).await?,
    );
    let client = ListenerClient::new(store, settings.listener().timeout());
    info!(endpoint = %client.endpoint().await?, "Compiling");

    match client.compile(&request, *normalized.parsed()).await {
        Ok(report) => Ok(render_report(&report).to_plain_text()),
        Err(e) => {
            eprintln!("{}", render_failure(&e).to_plain_text());
            Err(e.into())
        }
    }
}
