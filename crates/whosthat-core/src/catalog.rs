//! Catalog loading and record normalization.
//!
//! A load issues one fetch per id in `1..=batch_size`, awaits them as a group,
//! and either yields the whole catalog or fails. There is no retry and no
//! timeout.

use futures::future::try_join_all;
use serde_json::Value;
use tracing::instrument;

use crate::error::LoadError;
use crate::model::{Catalog, CatalogEntry};
use crate::traits::CatalogSource;

/// Number of records fetched when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: u32 = 50;

/// JSON pointer to the display name in a raw record.
pub const NAME_POINTER: &str = "/name";

/// JSON pointer to the official artwork URL in a raw record.
pub const ARTWORK_POINTER: &str = "/sprites/other/official-artwork/front_default";

/// Load `batch_size` entries from `source`.
#[instrument(skip(source), fields(source_name = source.name()))]
pub async fn load_catalog(
    source: &dyn CatalogSource,
    batch_size: u32,
) -> Result<Catalog, LoadError> {
    let fetches = (1..=batch_size).map(|id| source.fetch_entry(id));

    let records = match try_join_all(fetches).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("catalog load failed: {e}");
            return Err(LoadError::from(e));
        }
    };

    let entries: Vec<CatalogEntry> = records.iter().map(normalize_entry).collect();
    let degraded = entries.iter().filter(|e| e.is_degraded()).count();
    if degraded > 0 {
        tracing::warn!("{degraded} catalog entries are missing artwork");
    }

    let catalog = Catalog::new(entries);
    tracing::info!(
        entries = catalog.len(),
        distinct = catalog.distinct_names(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Turn a raw record into a [`CatalogEntry`].
///
/// Missing, null, or non-string fields become empty strings. The artwork URL
/// doubles as the silhouette.
pub fn normalize_entry(raw: &Value) -> CatalogEntry {
    let name = string_at(raw, NAME_POINTER);
    let artwork = string_at(raw, ARTWORK_POINTER);
    if artwork.is_empty() {
        tracing::debug!(name = %name, "entry has no artwork");
    }
    CatalogEntry {
        name,
        image_url: artwork.clone(),
        silhouette_url: artwork,
    }
}

fn string_at(raw: &Value, pointer: &str) -> String {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
