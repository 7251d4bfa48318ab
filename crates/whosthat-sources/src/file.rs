//! Catalog source backed by a local JSON file.
//!
//! The file holds a JSON array of raw records in the same shape the HTTP API
//! returns; id `n` maps to element `n - 1`. Useful offline and in tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use whosthat_core::error::SourceError;
use whosthat_core::traits::CatalogSource;

pub struct FileSource {
    path: PathBuf,
    records: Vec<serde_json::Value>,
}

impl FileSource {
    /// Read and parse the whole file up front.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&content)
            .with_context(|| format!("catalog file is not a JSON array: {}", path.display()))?;
        tracing::debug!(path = %path.display(), records = records.len(), "catalog file read");
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn from_records(records: Vec<serde_json::Value>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_entry(&self, id: u32) -> Result<serde_json::Value, SourceError> {
        let index = (id as usize).checked_sub(1).ok_or(SourceError::NotFound(id))?;
        self.records.get(index).cloned().ok_or_else(|| {
            tracing::debug!(path = %self.path.display(), id, "id past end of catalog file");
            SourceError::NotFound(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use whosthat_core::catalog::load_catalog;

    fn write_catalog(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn ids_map_to_array_positions() {
        let file = write_catalog(
            r#"[
                {"name": "bulbasaur", "sprites": {"other": {"official-artwork": {"front_default": "b.png"}}}},
                {"name": "ivysaur", "sprites": {"other": {"official-artwork": {"front_default": "i.png"}}}}
            ]"#,
        );
        let source = FileSource::open(file.path()).unwrap();
        assert_eq!(source.len(), 2);

        assert_eq!(source.fetch_entry(2).await.unwrap()["name"], "ivysaur");
        assert!(matches!(
            source.fetch_entry(0).await.unwrap_err(),
            SourceError::NotFound(0)
        ));
        assert!(matches!(
            source.fetch_entry(3).await.unwrap_err(),
            SourceError::NotFound(3)
        ));
    }

    #[tokio::test]
    async fn degraded_records_still_load() {
        let file = write_catalog(r#"[{"name": "squirtle"}, {"sprites": {}}]"#);
        let source = FileSource::open(file.path()).unwrap();

        let catalog = load_catalog(&source, 2).await.unwrap();
        assert_eq!(catalog.entries()[0].name, "squirtle");
        assert_eq!(catalog.entries()[0].image_url, "");
        assert_eq!(catalog.entries()[1].name, "");
    }

    #[test]
    fn rejects_non_array_file() {
        let file = write_catalog(r#"{"name": "pikachu"}"#);
        let err = FileSource::open(file.path()).err().unwrap();
        assert!(err.to_string().contains("not a JSON array"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = FileSource::open(Path::new("/definitely/not/here.json"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("failed to read catalog file"));
    }
}
