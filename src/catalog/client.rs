//! HTTP client for the remote catalog API
//!
//! Talks to a PokeAPI-compatible listing/detail endpoint pair
//! (default: https://pokeapi.co/api/v2/pokemon)

use async_trait::async_trait;
use reqwest::Client;

use super::error::CatalogError;
use super::types::{ListingPage, PokemonDetail};

/// Catalog client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2/pokemon".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fetch operations the browser needs from the remote catalog
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch one page of the listing endpoint
    async fn fetch_listing(&self, offset: u32, limit: u32) -> Result<ListingPage, CatalogError>;

    /// Fetch the full detail record behind an opaque URL
    async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, CatalogError>;

    /// Look up a single record by exact name. `Ok(None)` means the server
    /// answered 404 (no exact match), which is not an error.
    async fn fetch_by_name(&self, name: &str) -> Result<Option<PokemonDetail>, CatalogError>;
}

/// Reqwest-backed catalog client
pub struct CatalogClient {
    config: ClientConfig,
    client: Client,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    pub fn with_default_config() -> Self {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::BadStatus(
                response.status().as_u16(),
                url.to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl CatalogFetcher for CatalogClient {
    async fn fetch_listing(&self, offset: u32, limit: u32) -> Result<ListingPage, CatalogError> {
        let url = format!("{}?offset={}&limit={}", self.config.base_url, offset, limit);
        self.get_json(&url).await
    }

    async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, CatalogError> {
        self.get_json(url).await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Option<PokemonDetail>, CatalogError> {
        let url = format!("{}/{}", self.config.base_url, name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(CatalogError::BadStatus(response.status().as_u16(), url));
        }

        let detail = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(Some(detail))
    }
}
