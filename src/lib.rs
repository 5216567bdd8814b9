//! Souschef - recipe generation service
//!
//! Souschef turns a list of ingredients into complete recipes using a
//! fine-tuned sequence-to-sequence model, with an optional causal-LM pass
//! that polishes the language. It ships as a single binary exposing a JSON
//! API and an embedded browser client.
//!
//! # Architecture
//!
//! - **ingredient**: preprocessing of client-supplied ingredient lists
//! - **model**: candle-backed generation and enhancement models
//! - **engine**: the generate / parse / enhance / score pipeline
//! - **recipe**: structured recipe types, output parsing, quality scoring
//! - **server**: axum HTTP layer and the embedded web client
//!
//! # Example
//!
//! ```bash
//! # Start the server
//! souschef serve --port 8080
//!
//! # One-shot generation from the command line
//! souschef generate chicken garlic butter
//!
//! # Pre-download model weights
//! souschef pull flax-community/t5-recipe-generation
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod ingredient;
pub mod loader;
pub mod model;
pub mod recipe;
pub mod server;
pub mod web;

// Re-export key types
pub use config::{AppConfig, GenerationConfig, ServerConfig};
pub use engine::{GenerationOutcome, PipelineError, RecipePipeline};
pub use recipe::{Recipe, RecipeScore, ScoredRecipe};
