//! PokéAPI catalog source.

use async_trait::async_trait;
use tracing::instrument;

use whosthat_core::error::SourceError;
use whosthat_core::traits::CatalogSource;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const USER_AGENT: &str = concat!("whosthat/", env!("CARGO_PKG_VERSION"));

/// Fetches `GET {base_url}/pokemon/{id}`. No timeout and no retry: a stalled
/// request stalls the load.
pub struct PokeApiSource {
    base_url: String,
    client: reqwest::Client,
}

impl PokeApiSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn entry_url(&self, id: u32) -> String {
        format!("{}/pokemon/{id}", self.base_url)
    }
}

#[async_trait]
impl CatalogSource for PokeApiSource {
    fn name(&self) -> &str {
        "pokeapi"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_entry(&self, id: u32) -> Result<serde_json::Value, SourceError> {
        let response = self
            .client
            .get(self.entry_url(id))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SourceError::Network(format!("PokéAPI not reachable at {}", self.base_url))
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(id));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status,
                message: body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SourceError::Decode {
                id,
                message: e.to_string(),
            })
    }
}
