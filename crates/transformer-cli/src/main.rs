//! Transformer - command line client for the image service

use std::process::ExitCode;

use clap::Parser;
use transformer_cli::{run, Args, Settings};
use transformer_client::TransformerClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments
    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("transformer_cli={0},transformer_client={0}", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Build configuration
    let settings = args.apply(Settings::load(args.config.as_deref())?);
    tracing::debug!(
        api_url = %settings.api_url,
        delivery_url = %settings.delivery_url,
        "Loaded settings"
    );

    let client = TransformerClient::new(settings.client_config())?;

    if run(&client, args.command).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
