//! whosthat-sources — catalog data sources.
//!
//! Implements the `CatalogSource` trait for PokéAPI, local JSON files, and an
//! in-memory mock, plus the config layer that picks one.

pub mod config;
pub mod file;
pub mod mock;
pub mod pokeapi;

pub use config::{create_source, load_config, load_config_from, SourceConfig, WhosthatConfig};
pub use file::FileSource;
pub use mock::MockSource;
pub use pokeapi::PokeApiSource;
pub use whosthat_core::error::SourceError;
