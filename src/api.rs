//! HTTP client for the realestate.co.nz search API.
//!
//! Three endpoints are used, all plain GETs returning JSON:
//! - `{base}/listings?filter[...]...` filtered search, `{ data: [...], meta: { total } }`
//! - `{base}/smart-search?q=...` free-text search, same envelope
//! - `{base}/listings/{id}` listing detail, `{ data: {...} }`
//!
//! No retries: a failed request is reported once, naming the operation.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::listing::{DetailResponse, RawListing, SearchResponse};
use crate::query::QueryParams;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://platform.realestate.co.nz/search/v1";

/// Residential sale listing category
pub const SALE_CATEGORY: &str = "res_sale";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} (HTTP {status})")]
    Status {
        operation: String,
        status: StatusCode,
    },

    #[error("{operation}: invalid response body ({source})")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: response contained no listing")]
    EmptyDetail { operation: String },
}

/// Thin client over the upstream search endpoints
#[derive(Debug, Clone)]
pub struct ListingsApi {
    client: reqwest::Client,
    base_url: String,
}

impl ListingsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Filtered listing search
    pub async fn search_listings(
        &self,
        params: &QueryParams,
        operation: &str,
    ) -> Result<SearchResponse, ApiError> {
        let url = format!("{}/listings?{}", self.base_url, params.encode());
        self.get_json(&url, operation).await
    }

    /// Free-text search scoped to sale listings
    pub async fn smart_search(&self, text: &str) -> Result<SearchResponse, ApiError> {
        let mut params = QueryParams::new();
        params
            .set("q", text)
            .set_list("filter[category]", [SALE_CATEGORY]);

        let url = format!("{}/smart-search?{}", self.base_url, params.encode());
        let operation = format!("Failed to search for address {text}");
        self.get_json(&url, &operation).await
    }

    /// Full detail for one listing
    pub async fn listing_detail(&self, listing_id: &str) -> Result<RawListing, ApiError> {
        let url = format!(
            "{}/listings/{}",
            self.base_url,
            urlencoding::encode(listing_id)
        );
        let operation = format!("Failed to fetch listing detail for {listing_id}");
        let detail: DetailResponse = self.get_json(&url, &operation).await?;
        detail.data.ok_or(ApiError::EmptyDetail { operation })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, operation: &str) -> Result<T, ApiError> {
        log::debug!("GET {url}");

        let transport = |source| ApiError::Transport {
            operation: operation.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{operation}: upstream returned {status} for {url}");
            return Err(ApiError::Status {
                operation: operation.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| {
            log::warn!("{operation}: could not decode response from {url}: {source}");
            ApiError::Decode {
                operation: operation.to_string(),
                source,
            }
        })
    }
}
