//! API Explorer client
//!
//! HTTP client for reading the product catalog, API lists and API details.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use crate::{
    config::Config,
    error::{ExportError, ExportResult},
    explorer::{
        catalog::ApiCatalog,
        headers::build_default_headers,
        models::{
            ApiListResponse, ApiSummary, CatalogResponse, DetailOptions, ListApiOptions,
            ProductGroup, VersionsResponse,
        },
        pagination::{collect_pages, Page},
    },
};

/// API Explorer client
pub struct ExplorerClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    page_size: usize,
    max_pages: usize,
}

impl ExplorerClient {
    /// Create a new client with its own connection pool and request timeout
    pub fn new(config: &Config) -> ExportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Self::with_client(client, config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: &Config) -> ExportResult<Self> {
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: build_default_headers(config.auth_token.as_deref(), config.english)?,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages,
        })
    }

    /// GET a path and return the raw body of a 2xx response
    pub async fn get_bytes(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ExportResult<Bytes> {
        let url = format!("{}{}", self.base_url, path);

        let request = self
            .client
            .get(&url)
            .query(query)
            .headers(self.headers.clone());

        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Request failed");
            ExportError::transport(&url, &e)
        })?;

        let status = response.status();
        debug!(url = %url, status = %status, "API Explorer response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(url = %url, status = %status, body = %text, "API Explorer request failed");
            return Err(ExportError::status(url, status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| ExportError::transport(&url, &e))
    }

    /// GET a path and decode the JSON envelope
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ExportResult<T> {
        let body = self.get_bytes(path, query).await?;

        serde_json::from_slice(&body).map_err(|e| {
            error!(path = %path, error = %e, "Failed to parse API Explorer response");
            ExportError::Decode {
                url: format!("{}{}", self.base_url, path),
                source: e,
            }
        })
    }

    /// Fetch one page of API summaries
    #[instrument(skip(self), fields(product = %product, version = %version))]
    pub async fn fetch_api_page(
        &self,
        product: &str,
        version: &str,
        offset: usize,
        limit: usize,
    ) -> ExportResult<Page<ApiSummary>> {
        let opts = ListApiOptions {
            offset,
            limit,
            product_short: product.to_string(),
            version: version.to_string(),
        };

        let response: ApiListResponse = self.get_json("/v3/apis", &opts.to_query()).await?;
        debug!(
            received = response.api_basic_infos.len(),
            count = response.count,
            "Fetched API page"
        );

        Ok(Page {
            items: response.api_basic_infos,
            total: response.count,
        })
    }
}

#[async_trait]
impl ApiCatalog for ExplorerClient {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> ExportResult<Vec<ProductGroup>> {
        debug!("Fetching product catalog");

        let response: CatalogResponse = self.get_json("/v4/products", &[]).await?;

        debug!(groups = response.groups.len(), "Fetched product catalog");
        Ok(response.groups)
    }

    #[instrument(skip(self))]
    async fn fetch_versions(&self, product: &str) -> ExportResult<Vec<String>> {
        let query = [("productshort", product.to_string())];
        let response: VersionsResponse = self.get_json("/v2/versions", &query).await?;

        if response.versions.is_empty() && response.count > 0 {
            warn!(count = response.count, "Version count reported without version entries");
        }

        let versions = response.version_names();
        debug!(versions = ?versions, "Resolved product versions");
        Ok(versions)
    }

    #[instrument(skip(self))]
    async fn list_apis(&self, product: &str, version: &str) -> ExportResult<Vec<ApiSummary>> {
        collect_pages(self.page_size, self.max_pages, |offset, limit| {
            self.fetch_api_page(product, version, offset, limit)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_detail(
        &self,
        product: &str,
        api_id: &str,
        version: &str,
        region: Option<&str>,
    ) -> ExportResult<Bytes> {
        let opts = DetailOptions {
            product_short: product,
            name: api_id,
            version,
            region,
        };

        let body = self
            .get_bytes("/v4/apis/detail", &opts.to_query())
            .await?;

        debug!(bytes = body.len(), "Fetched API detail");
        Ok(body)
    }
}
