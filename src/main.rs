//! Bean Classifier - Main Entry Point
//!
//! Form controller front end for the Dry Bean prediction service, with CLI,
//! interactive and web UI modes.

use clap::Parser;
use bean_classifier::cli::{Cli, Commands, cmd_batch, cmd_info, cmd_interactive, cmd_predict, cmd_serve, server_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bean_classifier=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();

    match cli.command {
        Some(Commands::Predict { values, sample, html }) => {
            cmd_predict(&config, &values, sample, html.as_deref()).await?;
        }
        Some(Commands::Batch { input, json, html }) => {
            cmd_batch(&config, input.as_deref(), json.as_deref(), html.as_deref()).await?;
        }
        Some(Commands::Info) => {
            cmd_info(&config).await?;
        }
        Some(Commands::Serve { port, host }) => {
            cmd_serve(server_config(&config, host, port)).await?;
        }
        None => {
            cmd_interactive(&server_config(&config, None, None)).await?;
        }
    }

    Ok(())
}
