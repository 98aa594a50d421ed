//! odcompile CLI binary.
//!
//! - Run the Discord bot
//! - Compile a local DM file against the configured listener
//! - Inspect and change the stored listener URL

use clap::Parser;
use odcompile::{
    Cli, Commands, ObservabilityConfig, compile_file, init_observability, run_bot, set_listener,
    show_config,
};
use odcompile_config::OdCompileSettings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may hold DISCORD_TOKEN
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let settings = OdCompileSettings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { token } => {
            run_bot(&settings, token).await?;
        }

        Commands::Compile {
            file,
            debug,
            no_parsing,
            args,
        } => {
            let rendered = compile_file(&settings, &file, debug, no_parsing, &args).await?;
            println!("{}", rendered);
        }

        Commands::SetListener { url } => {
            println!("{}", set_listener(&settings, &url).await?);
        }

        Commands::ShowConfig => {
            println!("{}", show_config(&settings).await?);
        }
    }

    Ok(())
}
