use odcompile_config::{
    ConfigStore, DEFAULT_LISTENER_URL, JsonConfigStore, MemoryConfigStore, PluginConfig,
    normalize_listener_url,
};
use odcompile_error::ConfigErrorKind;

#[test]
fn normalize_strips_trailing_separators() {
    assert_eq!(
        normalize_listener_url(Some("http://example.com/")).unwrap(),
        "http://example.com"
    );
    assert_eq!(
        normalize_listener_url(Some("  https://listener.local:5000///  ")).unwrap(),
        "https://listener.local:5000"
    );
    assert_eq!(
        normalize_listener_url(Some("http://10.0.0.2:5000/odcompile/")).unwrap(),
        "http://10.0.0.2:5000/odcompile"
    );
}

#[test]
fn normalize_rejects_malformed_input() {
    let missing = normalize_listener_url(None).unwrap_err();
    assert_eq!(missing.kind, ConfigErrorKind::MissingListenerUrl);

    let blank = normalize_listener_url(Some("   ")).unwrap_err();
    assert_eq!(blank.kind, ConfigErrorKind::MissingListenerUrl);

    for bad in [
        "localhost:5000",
        "ftp://example.com",
        "not a url",
        "http://",
        "http://example.com/?x=1",
    ] {
        let err = normalize_listener_url(Some(bad)).unwrap_err();
        assert!(
            matches!(err.kind, ConfigErrorKind::InvalidListenerUrl { .. }),
            "expected {bad:?} to be rejected, got {err}"
        );
    }
}

#[tokio::test]
async fn memory_store_round_trips_normalized_url() {
    let store = MemoryConfigStore::default();
    assert_eq!(store.listener_url().await.unwrap(), DEFAULT_LISTENER_URL);

    let stored = store
        .set_listener_url(Some("http://example.com/"))
        .await
        .unwrap();
    assert_eq!(stored, "http://example.com");
    assert_eq!(store.listener_url().await.unwrap(), "http://example.com");
}

#[tokio::test]
async fn setting_same_url_twice_is_idempotent() {
    let store = MemoryConfigStore::default();
    let first = store
        .set_listener_url(Some("http://example.com/"))
        .await
        .unwrap();
    let second = store
        .set_listener_url(Some("http://example.com/"))
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(store.listener_url().await.unwrap(), first);
}

#[tokio::test]
async fn failed_set_keeps_previous_url() {
    let store = MemoryConfigStore::new(PluginConfig::with_listener("http://keep.me"));
    assert!(store.set_listener_url(Some("nope")).await.is_err());
    assert_eq!(store.listener_url().await.unwrap(), "http://keep.me");
}

#[tokio::test]
async fn json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/state.json");

    let store = JsonConfigStore::open(&path, "http://localhost:5000/")
        .await
        .unwrap();
    assert_eq!(store.listener_url().await.unwrap(), "http://localhost:5000");
    assert_eq!(store.config_version().await.unwrap(), None);

    store
        .set_listener_url(Some("http://example.com/"))
        .await
        .unwrap();
    store.set_config_version("2").await.unwrap();
    drop(store);

    let reopened = JsonConfigStore::open(&path, DEFAULT_LISTENER_URL)
        .await
        .unwrap();
    assert_eq!(reopened.listener_url().await.unwrap(), "http://example.com");
    assert_eq!(
        reopened.config_version().await.unwrap().as_deref(),
        Some("2")
    );
}

#[tokio::test]
async fn json_store_reports_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = JsonConfigStore::open(&path, DEFAULT_LISTENER_URL)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::StoreFormat(_)));
}

#[tokio::test]
async fn json_store_sees_writes_from_another_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let bot = JsonConfigStore::open(&path, DEFAULT_LISTENER_URL)
        .await
        .unwrap();
    let cli = JsonConfigStore::open(&path, DEFAULT_LISTENER_URL)
        .await
        .unwrap();

    cli.set_listener_url(Some("http://new-listener:5000"))
        .await
        .unwrap();
    assert_eq!(
        bot.listener_url().await.unwrap(),
        "http://new-listener:5000"
    );

    bot.set_config_version("3").await.unwrap();

    let on_disk: PluginConfig =
        serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
    assert_eq!(on_disk.listener_url, "http://new-listener:5000");
    assert_eq!(on_disk.config_version.as_deref(), Some("3"));
    assert_eq!(cli.config_version().await.unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn json_store_does_not_create_file_until_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store = JsonConfigStore::open(&path, DEFAULT_LISTENER_URL)
        .await
        .unwrap();
    assert_eq!(store.listener_url().await.unwrap(), DEFAULT_LISTENER_URL);
    assert!(!path.exists());

    store.set_config_version("2").await.unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("state.json.tmp").exists());
}
