//! Source configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use whosthat_core::catalog::DEFAULT_BATCH_SIZE;
use whosthat_core::traits::CatalogSource;

use crate::file::FileSource;
use crate::pokeapi::{PokeApiSource, DEFAULT_BASE_URL};

/// Environment variable that overrides the PokéAPI base URL.
pub const BASE_URL_ENV: &str = "WHOSTHAT_BASE_URL";

/// Where catalog records come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    PokeApi {
        #[serde(default = "default_base_url")]
        base_url: String,
    },
    File {
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::PokeApi {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Top-level whosthat configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhosthatConfig {
    /// Catalog source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Number of records fetched at startup.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Fixed RNG seed for reproducible games.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_batch_size() -> u32 {
    DEFAULT_BATCH_SIZE
}

impl Default for WhosthatConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            batch_size: default_batch_size(),
            seed: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Single pass: substituted values are copied verbatim, never re-expanded.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::PokeApi { base_url } => SourceConfig::PokeApi {
            base_url: resolve_env_vars(base_url),
        },
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `whosthat.toml` in the current directory
/// 2. `~/.config/whosthat/config.toml`
///
/// `WHOSTHAT_BASE_URL` overrides the PokéAPI base URL.
pub fn load_config() -> Result<WhosthatConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WhosthatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("whosthat.toml");
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
            let config = toml::from_str::<WhosthatConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => WhosthatConfig::default(),
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if let SourceConfig::PokeApi { base_url } = &mut config.source {
            *base_url = url;
        }
    }

    config.source = resolve_source_config(&config.source);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("whosthat"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn CatalogSource>> {
    match config {
        SourceConfig::PokeApi { base_url } => Ok(Box::new(PokeApiSource::new(base_url)?)),
        SourceConfig::File { path } => Ok(Box::new(FileSource::open(path)?)),
    }
}
