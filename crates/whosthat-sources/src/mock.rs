//! Mock source for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use whosthat_core::error::SourceError;
use whosthat_core::traits::CatalogSource;

/// An in-memory catalog source that can be told to fail on chosen ids.
pub struct MockSource {
    records: Vec<serde_json::Value>,
    failing_ids: HashSet<u32>,
    call_count: AtomicU32,
    requested: Mutex<Vec<u32>>,
}

impl MockSource {
    pub fn new(records: Vec<serde_json::Value>) -> Self {
        Self {
            records,
            failing_ids: HashSet::new(),
            call_count: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A source with `count` well-formed records named `mon-1` .. `mon-{count}`.
    pub fn with_generated(count: u32) -> Self {
        Self::new((1..=count).map(|i| record(&format!("mon-{i}"))).collect())
    }

    /// Make fetches for `id` fail with a network error.
    pub fn failing_on(mut self, id: u32) -> Self {
        self.failing_ids.insert(id);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Ids requested so far, in call order.
    pub fn requested_ids(&self) -> Vec<u32> {
        self.requested
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

/// A well-formed raw record with artwork at `https://example.com/{name}.png`.
pub fn record(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "sprites": {"other": {"official-artwork": {
            "front_default": format!("https://example.com/{name}.png")
        }}}
    })
}

#[async_trait]
impl CatalogSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_entry(&self, id: u32) -> Result<serde_json::Value, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut ids) = self.requested.lock() {
            ids.push(id);
        }

        if self.failing_ids.contains(&id) {
            return Err(SourceError::Network(format!("mock failure for id {id}")));
        }
        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
            .cloned()
            .ok_or(SourceError::NotFound(id))
    }
}
