//! API catalog abstraction
//!
//! Defines the interface the exporter walks, so the traversal can run against
//! the live API Explorer or an in-memory catalog.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ExportResult;
use crate::explorer::models::{ApiSummary, ProductGroup};

/// Read-only access to a provider's API catalog
#[async_trait]
pub trait ApiCatalog: Send + Sync {
    /// Fetch every catalog group with its products
    async fn fetch_catalog(&self) -> ExportResult<Vec<ProductGroup>>;

    /// Fetch the API versions of a product
    ///
    /// Always returns at least one element; `""` stands for a product without
    /// versions.
    async fn fetch_versions(&self, product: &str) -> ExportResult<Vec<String>>;

    /// List every API of a (product, version) pair
    async fn list_apis(&self, product: &str, version: &str) -> ExportResult<Vec<ApiSummary>>;

    /// Fetch the raw JSON detail document of one API
    async fn fetch_detail(
        &self,
        product: &str,
        api_id: &str,
        version: &str,
        region: Option<&str>,
    ) -> ExportResult<Bytes>;
}
