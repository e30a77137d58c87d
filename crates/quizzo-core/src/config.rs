//! quizzo configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::code::DEFAULT_CODE_LENGTH;
use crate::service::QuizServiceConfig;

/// Top-level quizzo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizzoConfig {
    /// Directory holding the JSON document store.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Length of generated quiz codes.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Output format for the leaderboard command.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./quizzo-data")
}
fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for QuizzoConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            code_length: default_code_length(),
            default_format: default_format(),
        }
    }
}

impl QuizzoConfig {
    pub fn service_config(&self) -> QuizServiceConfig {
        QuizServiceConfig {
            code_length: self.code_length,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again. An
/// unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                result.push_str(&std::env::var(&after[..end]).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizzo.toml` in the current directory
/// 2. `~/.config/quizzo/config.toml`
///
/// Environment variable override: `QUIZZO_STORE_DIR`.
pub fn load_config() -> Result<QuizzoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizzoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizzo.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizzoConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZZO_STORE_DIR") {
        config.store_dir = PathBuf::from(dir);
    }

    anyhow::ensure!(config.code_length >= 4, "code_length must be at least 4");

    Ok(config)
}

/// Parse a config file body, resolving `${VAR}` references in paths.
pub fn parse_config_str(content: &str) -> Result<QuizzoConfig> {
    let mut config: QuizzoConfig = toml::from_str(content)?;
    config.store_dir = PathBuf::from(resolve_env_vars(&config.store_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizzo"))
}
