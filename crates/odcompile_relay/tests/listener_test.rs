//! Relay tests against a stub listener served by axum on an ephemeral port.

use axum::{Json, Router, http::StatusCode, routing::post};
use odcompile_config::{ConfigStore, MemoryConfigStore, PluginConfig};
use odcompile_core::{BuildConfig, CompileRequest};
use odcompile_error::RelayErrorKind;
use odcompile_relay::{
    CompileOutcome, CompileRelay, ListenerClient, UNREACHABLE_TITLE, render_relay_result,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

async fn spawn_listener(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str, timeout: Duration) -> ListenerClient {
    let store = Arc::new(MemoryConfigStore::new(PluginConfig::with_listener(base_url)));
    ListenerClient::new(store, timeout)
}

fn hello_request(build_config: BuildConfig) -> CompileRequest {
    CompileRequest::new(
        "world.log << \"Hello\"",
        vec!["--version=515.1".to_string()],
        build_config,
    )
    .unwrap()
}

#[tokio::test]
async fn posts_request_body_to_compile_path() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let captured = seen.clone();
    let router = Router::new().route(
        "/compile",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                captured.lock().unwrap().push(body);
                Json(json!({
                    "compile_log": "0 errors, 0 warnings",
                    "run_log": "Hello",
                    "succeeded": true,
                    "version": "0.2.0",
                    "elapsed_ms": 812
                }))
            }
        }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_secs(5));

    let report = client
        .compile(&hello_request(BuildConfig::Debug), false)
        .await
        .unwrap();

    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["code"], "world.log << \"Hello\"");
    assert_eq!(bodies[0]["args"], json!(["--version=515.1"]));
    assert_eq!(bodies[0]["build_config"], "Debug");
    assert_eq!(bodies[0]["parsed"], false);

    assert_eq!(
        report.outcome(),
        &CompileOutcome::Output {
            compile_log: "0 errors, 0 warnings".to_string(),
            runtime_output: "Hello".to_string(),
            parsed: false,
        }
    );
    assert_eq!(report.listener_version().as_deref(), Some("0.2.0"));
    assert_eq!(*report.build_config(), BuildConfig::Debug);
}

#[tokio::test]
async fn distinguishes_compile_failure_and_silent_run() {
    let router = Router::new().route(
        "/compile",
        post(|Json(body): Json<Value>| async move {
            if body["code"].as_str().unwrap_or_default().contains("broken") {
                Json(json!({ "compile_log": "unexpected token at line 3", "succeeded": false }))
            } else {
                Json(json!({ "compile_log": "ok", "runtime_output": "  \n", "succeeded": true }))
            }
        }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_secs(5));

    let broken = CompileRequest::new("broken(", vec![], BuildConfig::Release).unwrap();
    let report = client.compile(&broken, true).await.unwrap();
    assert_eq!(
        report.outcome(),
        &CompileOutcome::CompileFailed {
            compile_log: "unexpected token at line 3".to_string()
        }
    );

    let report = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await
        .unwrap();
    assert!(matches!(report.outcome(), CompileOutcome::NoOutput { .. }));
}

#[tokio::test]
async fn slow_listener_times_out_within_bound() {
    let router = Router::new().route(
        "/compile",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({ "compile_log": "", "succeeded": true }))
        }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_millis(200));

    let started = Instant::now();
    let result = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await;
    let elapsed = started.elapsed();

    let err = result.as_ref().unwrap_err();
    assert_eq!(err.kind, RelayErrorKind::Timeout(200));
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    assert_eq!(render_relay_result(&result).title(), UNREACHABLE_TITLE);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr), Duration::from_secs(5));
    let err = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, RelayErrorKind::Connection(_)));
}

#[tokio::test]
async fn missing_required_fields_are_malformed() {
    let router = Router::new().route(
        "/compile",
        post(|| async { Json(json!({ "runtime_output": "hi" })) }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_secs(5));

    let err = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, RelayErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn error_status_without_result_body_is_reported() {
    let router = Router::new().route(
        "/compile",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "listener crashed") }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_secs(5));

    let err = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind, RelayErrorKind::Status(500));
}

#[tokio::test]
async fn error_status_with_result_body_is_still_rendered() {
    let router = Router::new().route(
        "/compile",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "compile_log": "error: bad proc", "succeeded": false })),
            )
        }),
    );
    let base = spawn_listener(router).await;
    let client = client_for(&base, Duration::from_secs(5));

    let report = client
        .compile(&hello_request(BuildConfig::Release), true)
        .await
        .unwrap();
    assert!(matches!(
        report.outcome(),
        CompileOutcome::CompileFailed { .. }
    ));
}

#[tokio::test]
async fn listener_url_is_read_fresh_per_call() {
    let first = spawn_listener(Router::new().route(
        "/compile",
        post(|| async { Json(json!({ "compile_log": "first", "succeeded": false })) }),
    ))
    .await;
    let second = spawn_listener(Router::new().route(
        "/compile",
        post(|| async { Json(json!({ "compile_log": "second", "succeeded": false })) }),
    ))
    .await;

    let store = Arc::new(MemoryConfigStore::new(PluginConfig::with_listener(&first)));
    let client = ListenerClient::new(store.clone(), Duration::from_secs(5));
    let request = hello_request(BuildConfig::Release);

    let report = client.compile(&request, true).await.unwrap();
    assert_eq!(report.outcome().compile_log(), "first");

    store
        .set_listener_url(Some(&format!("{}/", second)))
        .await
        .unwrap();
    assert_eq!(client.endpoint().await.unwrap(), format!("{}/compile", second));

    let report = client.compile(&request, true).await.unwrap();
    assert_eq!(report.outcome().compile_log(), "second");
}
