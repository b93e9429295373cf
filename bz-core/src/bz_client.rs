use async_trait::async_trait;
use bz_domain::validation::{decode_validated, item_catalog_response_schema, marketplace_response_schema, Schema};
use bz_domain::{ItemCatalogResponse, MarketplaceResponse, ValidationError};
use mockall::automock;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use tracing::{event, Level};

use crate::configuration::GeneratorConfiguration;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogFetchError {
    /// transport errors, non-success status codes and bodies that aren't json
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: BoxError },
    #[error("Response from {url} failed validation: {source}")]
    Validation { url: String, source: ValidationError },
}

impl CatalogFetchError {
    fn fetch(url: &str, source: impl Into<BoxError>) -> Self {
        CatalogFetchError::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            CatalogFetchError::Fetch { url, .. } | CatalogFetchError::Validation { url, .. } => url,
        }
    }
}

#[automock]
#[async_trait]
pub trait CatalogClientTrait: Send + Sync + Debug {
    async fn get_marketplace(&self) -> Result<MarketplaceResponse, CatalogFetchError>;

    async fn get_item_catalog(&self) -> Result<ItemCatalogResponse, CatalogFetchError>;
}

#[derive(Debug, Clone)]
pub struct HypixelClient {
    pub client: ClientWithMiddleware,
    marketplace_url: String,
    item_catalog_url: String,
}

impl HypixelClient {
    pub fn new(client: ClientWithMiddleware, cfg: &GeneratorConfiguration) -> Self {
        HypixelClient {
            client,
            marketplace_url: cfg.marketplace_url.clone(),
            item_catalog_url: cfg.item_catalog_url.clone(),
        }
    }

    async fn validated_fetch<T: DeserializeOwned>(&self, url: &str, schema: &Schema, label: &str) -> Result<T, CatalogFetchError> {
        event!(Level::INFO, "Fetching {} from {}", label, url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogFetchError::fetch(url, e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| CatalogFetchError::fetch(url, e))?;

        if !status.is_success() {
            return Err(CatalogFetchError::fetch(url, format!("API request failed. Status: {}", status)));
        }

        let json: Value = serde_json::from_str(&body).map_err(|e| CatalogFetchError::fetch(url, e))?;

        decode_validated(json, schema).map_err(|source| CatalogFetchError::Validation {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogClientTrait for HypixelClient {
    async fn get_marketplace(&self) -> Result<MarketplaceResponse, CatalogFetchError> {
        self.validated_fetch(&self.marketplace_url, &marketplace_response_schema(), "Bazaar Data")
            .await
    }

    async fn get_item_catalog(&self) -> Result<ItemCatalogResponse, CatalogFetchError> {
        self.validated_fetch(&self.item_catalog_url, &item_catalog_response_schema(), "Item Data")
            .await
    }
}
