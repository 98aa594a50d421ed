use clap::Parser;
use odcompile::{Cli, Commands, compose_chat_input, set_listener, show_config};
use odcompile_config::OdCompileSettings;
use odcompile_core::normalize_input;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn parses_compile_with_repeated_args() {
    let cli = Cli::try_parse_from([
        "odcompile",
        "--verbose",
        "compile",
        "hello.dm",
        "--debug",
        "--arg",
        "--version=515.1",
        "--arg=--define=FOO",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Compile {
            file,
            debug,
            no_parsing,
            args,
        } => {
            assert_eq!(file, PathBuf::from("hello.dm"));
            assert!(debug);
            assert!(!no_parsing);
            assert_eq!(args, vec!["--version=515.1", "--define=FOO"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_follow_subcommands() {
    let cli =
        Cli::try_parse_from(["odcompile", "show-config", "--json-logs", "--config", "a.toml"])
            .unwrap();
    assert!(cli.json_logs);
    assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
    assert!(matches!(cli.command, Commands::ShowConfig));
}

#[test]
fn set_listener_requires_url() {
    assert!(Cli::try_parse_from(["odcompile", "set-listener"]).is_err());
}

#[test]
fn composed_file_input_normalizes_like_chat() {
    let source = "/proc/main()\n    world.log << \"Hi\"\n";
    let input = compose_chat_input(source, &["--version=515.1".to_string()], true);
    let normalized = normalize_input(&input);

    assert_eq!(
        normalized.code().as_deref(),
        Some("/proc/main()\n    world.log << \"Hi\"")
    );
    assert_eq!(normalized.args(), &vec!["--version=515.1".to_string()]);
    assert!(!normalized.parsed());
}

fn settings_with_store(dir: &tempfile::TempDir) -> OdCompileSettings {
    let store_path = dir.path().join("state").join("odcompile-state.json");
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile_in(dir.path())
        .unwrap();
    writeln!(file, "[store]\npath = {:?}", store_path.display().to_string()).unwrap();
    OdCompileSettings::from_file(file.path()).unwrap()
}

#[tokio::test]
async fn store_commands_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_with_store(&dir);

    let shown = show_config(&settings).await.unwrap();
    assert!(shown.contains("Listener URL: http://localhost:5000"));
    assert!(shown.contains("Config version: not set"));

    let confirmation = set_listener(&settings, "https://compile.example/")
        .await
        .unwrap();
    assert_eq!(confirmation, "Listener URL set to: https://compile.example");

    let shown = show_config(&settings).await.unwrap();
    assert!(shown.contains("Listener URL: https://compile.example"));
    assert!(dir.path().join("state").join("odcompile-state.json").exists());
}

#[tokio::test]
async fn rejected_listener_url_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_with_store(&dir);

    assert!(set_listener(&settings, "ftp://nope").await.is_err());
}
