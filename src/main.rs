use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use souschef::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "souschef=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => {
            souschef::cli::serve(port, host).await?;
        }
        Commands::Pull { repo, output } => {
            souschef::cli::pull(repo, output)?;
        }
        Commands::Generate {
            ingredients,
            preset,
            seed,
        } => {
            souschef::cli::generate(ingredients, preset, seed)?;
        }
    }

    Ok(())
}
