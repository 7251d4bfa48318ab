pub mod catalog;
pub mod init;
pub mod play;

use anyhow::Result;

use whosthat_core::{load_catalog, Catalog, LoadError};
use whosthat_sources::{create_source, load_config_from, SourceConfig, WhosthatConfig};

use crate::CatalogArgs;

/// Shown in place of the game when the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str =
    "Ooops! We caught an error, not a Pokémon! Please try again later.";

/// Load the config file and apply command-line overrides.
pub fn resolve_config(args: &CatalogArgs) -> Result<WhosthatConfig> {
    let mut config = load_config_from(args.config.as_deref())?;

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(path) = &args.source_file {
        config.source = SourceConfig::File { path: path.clone() };
    }

    anyhow::ensure!(config.batch_size >= 1, "batch size must be at least 1");
    Ok(config)
}

/// Build the configured source and fetch the startup batch.
///
/// The outer error covers setup (a missing fixture file, a bad base URL);
/// the inner one is the load itself, which the game stores as its status.
pub async fn fetch_catalog(config: &WhosthatConfig) -> Result<Result<Catalog, LoadError>> {
    let source = create_source(&config.source)?;
    Ok(load_catalog(source.as_ref(), config.batch_size).await)
}
