//! Pull model from HuggingFace Hub

use std::path::PathBuf;

use anyhow::Result;

use crate::loader;

/// Download a model's files into the local model directory
pub fn pull(repo: String, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| {
        std::env::var("SOUSCHEF_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models"))
    });

    println!("Downloading from: {}", repo);
    let model_dir = loader::fetch_model(&repo, &output_dir)?;
    println!("Model downloaded to: {}", model_dir.display());

    Ok(())
}
