//! Trait seam between the catalog loader and the data sources.
//!
//! Implemented by the `whosthat-sources` crate.

use async_trait::async_trait;

use crate::error::SourceError;

/// A backend that resolves a numeric id to a raw creature record.
///
/// Records are returned undecoded so the loader can normalize whatever shape
/// comes back instead of rejecting it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name (e.g. "pokeapi").
    fn name(&self) -> &str;

    /// Fetch the raw record for `id`. Ids start at 1.
    async fn fetch_entry(&self, id: u32) -> Result<serde_json::Value, SourceError>;
}
