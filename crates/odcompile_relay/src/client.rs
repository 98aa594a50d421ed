//! HTTP client for the compile listener.

use crate::{CompileReport, CompileResult};
use async_trait::async_trait;
use odcompile_config::ConfigStore;
use odcompile_core::{BuildConfig, CompileRequest};
use odcompile_error::{RelayError, RelayErrorKind};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Path appended to the listener base URL.
pub const COMPILE_PATH: &str = "/compile";

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Sends a compile request somewhere and reports what came back.
///
/// Implementations must not hang: every call resolves to a report or an
/// error within their own bound.
#[async_trait]
pub trait CompileRelay: Send + Sync {
    /// Compile and run `request`.
    ///
    /// `parsed` asks the listener for a cleaned-up transcript instead of the
    /// raw one.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] when the listener cannot be reached, times
    /// out, or answers with something that is not a compile result. A compile
    /// error in the submitted code is an `Ok` report.
    async fn compile(&self, request: &CompileRequest, parsed: bool)
    -> RelayResult<CompileReport>;
}

#[derive(Debug, Serialize)]
struct CompilePayload<'a> {
    code: &'a str,
    args: &'a [String],
    build_config: BuildConfig,
    parsed: bool,
}

/// Client for the OpenDream compile listener.
///
/// The base URL is read from the config store on every call, so a
/// `set-listener` takes effect for the next compile.
#[derive(Clone)]
pub struct ListenerClient {
    client: reqwest::Client,
    store: Arc<dyn ConfigStore>,
    timeout: Duration,
}

impl ListenerClient {
    /// Create a client with its own connection pool.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn ConfigStore>, timeout: Duration) -> Self {
        debug!("Creating listener client");
        Self::with_http_client(reqwest::Client::new(), store, timeout)
    }

    /// Create a client that shares an existing `reqwest` pool.
    pub fn with_http_client(
        client: reqwest::Client,
        store: Arc<dyn ConfigStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            store,
            timeout,
        }
    }

    /// Bound on a single compile round trip.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full compile endpoint for the currently configured listener.
    pub async fn endpoint(&self) -> RelayResult<String> {
        let base = self.store.listener_url().await.map_err(|e| {
            error!(error = %e, "Failed to read listener URL");
            RelayError::new(RelayErrorKind::Configuration(e.to_string()))
        })?;
        Ok(format!("{}{}", base, COMPILE_PATH))
    }

    async fn exchange(&self, url: &str, payload: &CompilePayload<'_>) -> RelayResult<CompileResult> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request to listener failed");
                RelayError::new(RelayErrorKind::Connection(e.to_string()))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read listener response");
            RelayError::new(RelayErrorKind::Connection(e.to_string()))
        })?;

        match serde_json::from_slice::<CompileResult>(&body) {
            Ok(result) => {
                if !status.is_success() {
                    debug!(%status, "Listener returned an error status with a compile result");
                }
                Ok(result)
            }
            Err(e) if status.is_success() => {
                warn!(error = %e, "Listener response did not match the expected shape");
                Err(RelayError::new(RelayErrorKind::MalformedResponse(
                    e.to_string(),
                )))
            }
            Err(_) => {
                warn!(%status, "Listener returned an error status");
                Err(RelayError::new(RelayErrorKind::Status(status.as_u16())))
            }
        }
    }
}

#[async_trait]
impl CompileRelay for ListenerClient {
    #[instrument(
        skip(self, request),
        fields(
            build_config = %request.build_config(),
            arg_count = request.args().len(),
            code_len = request.code().len(),
        )
    )]
    async fn compile(
        &self,
        request: &CompileRequest,
        parsed: bool,
    ) -> RelayResult<CompileReport> {
        let url = self.endpoint().await?;
        debug!(%url, "Sending code to the listener to be compiled:\n{}", request.code());

        let payload = CompilePayload {
            code: request.code(),
            args: request.args(),
            build_config: *request.build_config(),
            parsed,
        };

        // Dropping the exchange future on expiry cancels the in-flight request.
        let result = tokio::time::timeout(self.timeout, self.exchange(&url, &payload))
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Listener timed out");
                RelayError::new(RelayErrorKind::Timeout(self.timeout.as_millis() as u64))
            })??;

        debug!(succeeded = *result.succeeded(), "Listener responded");
        Ok(CompileReport::from_result(
            result,
            parsed,
            *request.build_config(),
        ))
    }
}
