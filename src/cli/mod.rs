//! CLI commands

mod generate;
mod pull;
mod serve;

pub use generate::generate;
pub use pull::pull;
pub use serve::serve;

use clap::{Parser, Subcommand};

/// Souschef - recipe generation service
#[derive(Parser)]
#[command(name = "souschef")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the recipe generation server
    Serve {
        /// Port to listen on (overrides SOUSCHEF_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides SOUSCHEF_HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// Pull a model from the HuggingFace Hub
    Pull {
        /// Repository ID (e.g., "flax-community/t5-recipe-generation")
        repo: String,

        /// Output directory
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },

    /// Generate recipes from the command line (non-interactive)
    Generate {
        /// Ingredients to cook with
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Generation preset (default, creative, focused, best_quality)
        #[arg(long)]
        preset: Option<String>,

        /// Fixed sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },
}
