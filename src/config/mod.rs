//! Configuration system for souschef
//!
//! All settings are resolved once at startup from `SOUSCHEF_*` environment
//! variables into a single [`AppConfig`] that is passed down to the
//! components that need it. Business logic never reads the environment.

mod generation;
mod models;
mod server;

pub use generation::GenerationConfig;
pub use models::{DevicePlacement, ModelConfig};
pub use server::ServerConfig;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

/// Souschef configuration
///
/// Combines model selection, generation parameters, and server settings.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Which models to load and where to place them
    pub models: ModelConfig,

    /// Default generation settings
    pub generation: GenerationConfig,

    /// Server settings (only for `souschef serve`)
    pub server: ServerConfig,
}

impl AppConfig {
    /// Resolve configuration from the environment
    ///
    /// Recognized variables:
    /// - `SOUSCHEF_GENERATION_MODEL` - hub repo id of the recipe model
    /// - `SOUSCHEF_ENHANCEMENT_MODEL` - hub repo id of the rewrite model
    /// - `SOUSCHEF_ENHANCEMENT` - enable the enhancement pass
    /// - `SOUSCHEF_MODEL_DIR` - local weight directory (default `./models`)
    /// - `SOUSCHEF_USE_GPU` - run inference on CUDA device 0
    /// - `SOUSCHEF_GENERATION_PRESET` - named generation preset
    /// - `SOUSCHEF_SEED` - fixed sampling seed
    /// - `SOUSCHEF_HOST` / `SOUSCHEF_PORT` - server bind address
    pub fn from_env() -> Result<Self> {
        let models = ModelConfig {
            generation_model: env_or("SOUSCHEF_GENERATION_MODEL", models::DEFAULT_GENERATION_MODEL),
            enhancement_model: env_or(
                "SOUSCHEF_ENHANCEMENT_MODEL",
                models::DEFAULT_ENHANCEMENT_MODEL,
            ),
            model_dir: PathBuf::from(env_or("SOUSCHEF_MODEL_DIR", "./models")),
            device: if env_flag("SOUSCHEF_USE_GPU")? {
                DevicePlacement::Cuda
            } else {
                DevicePlacement::Cpu
            },
            enhancement_enabled: env_flag("SOUSCHEF_ENHANCEMENT")?,
        };

        let mut generation = match std::env::var("SOUSCHEF_GENERATION_PRESET") {
            Ok(name) => GenerationConfig::preset(&name)
                .ok_or_else(|| anyhow!("unknown generation preset: '{}'", name))?,
            Err(_) => GenerationConfig::default(),
        };
        if let Ok(seed) = std::env::var("SOUSCHEF_SEED") {
            generation.seed = Some(seed.parse().context("SOUSCHEF_SEED must be an integer")?);
        }

        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("SOUSCHEF_HOST") {
            server.host = host;
        }
        if let Ok(port) = std::env::var("SOUSCHEF_PORT") {
            server.port = port.parse().context("SOUSCHEF_PORT must be a port number")?;
        }

        Ok(Self {
            models,
            generation,
            server,
        })
    }
}

/// Read an environment variable with a fallback default
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag from the environment
///
/// Accepts "1"/"true"/"yes"/"on" and "0"/"false"/"no"/"off" (case-insensitive).
/// An unset variable is false; anything else is an error.
fn env_flag(key: &str) -> Result<bool> {
    match std::env::var(key) {
        Ok(value) => {
            parse_flag(&value).ok_or_else(|| anyhow!("{} must be a boolean, got '{}'", key, value))
        }
        Err(_) => Ok(false),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_truthy() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("YES"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
    }

    #[test]
    fn test_parse_flag_falsy() {
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
    }

    #[test]
    fn test_parse_flag_invalid() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.device, DevicePlacement::Cpu);
        assert!(!config.models.enhancement_enabled);
        assert_eq!(config.server.port, 8080);
    }
}
