//! Mock API Explorer server for testing
//!
//! Provides wiremock-based mocks for the API Explorer endpoints:
//! - GET /v4/products - Product catalog
//! - GET /v2/versions - API versions of a product
//! - GET /v3/apis - Paginated API list
//! - GET /v4/apis/detail - API detail document
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::explorer::{ExplorerTestData, MockExplorerServer};
//!
//! #[tokio::test]
//! async fn test_with_explorer_mock() {
//!     let mock_server = MockExplorerServer::start().await;
//!     mock_server.mock_catalog(ExplorerTestData::storage_catalog()).await;
//!
//!     // Use mock_server.uri() as API_EXPLORER_URL
//! }
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock API Explorer server wrapper
pub struct MockExplorerServer {
    server: MockServer,
}

impl MockExplorerServer {
    /// Start a new mock API Explorer server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Get all received requests (for assertion in tests)
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Get only the requests sent to `endpoint`
    pub async fn requests_to(&self, endpoint: &str) -> Vec<wiremock::Request> {
        self.received_requests()
            .await
            .into_iter()
            .filter(|r| r.url.path() == endpoint)
            .collect()
    }

    // =========================================================================
    // GET /v4/products - Catalog
    // =========================================================================

    /// Mock a successful catalog response
    pub async fn mock_catalog(&self, groups: Value) {
        Mock::given(method("GET"))
            .and(path("/v4/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groups": groups })))
            .mount(&self.server)
            .await;
    }

    /// Mock an error status for any endpoint
    pub async fn mock_status(&self, endpoint: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string("server error"))
            .mount(&self.server)
            .await;
    }

    /// Mock a raw 200 body for any endpoint
    pub async fn mock_raw(&self, endpoint: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // GET /v2/versions - Versions
    // =========================================================================

    /// Mock the version list of a product
    pub async fn mock_versions(&self, product: &str, versions: &[&str]) {
        let entries: Vec<Value> = versions
            .iter()
            .map(|v| json!({ "name": v, "description": "" }))
            .collect();

        Mock::given(method("GET"))
            .and(path("/v2/versions"))
            .and(query_param("productshort", product))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": entries.len(),
                "is_multiple_version": entries.len() > 1,
                "versions": entries,
            })))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // GET /v3/apis - API list
    // =========================================================================

    /// Mock every page of an API list
    ///
    /// `ids` are served `page_size` at a time and `count` is reported as the
    /// total. One extra empty page is mounted after the data so a client that
    /// keeps going gets a short page rather than a 404.
    pub async fn mock_api_pages(
        &self,
        product: &str,
        version: &str,
        ids: &[String],
        page_size: usize,
        count: usize,
    ) {
        let mut offset = 0;
        loop {
            let end = (offset + page_size).min(ids.len());
            let page: Vec<Value> = ids[offset..end]
                .iter()
                .map(|id| ExplorerTestData::api_summary(id, product, version))
                .collect();

            let mut mock = Mock::given(method("GET"))
                .and(path("/v3/apis"))
                .and(query_param("offset", offset.to_string()))
                .and(query_param("product_short", product));
            if !version.is_empty() {
                mock = mock.and(query_param("info_version", version));
            }
            mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": count,
                "api_basic_infos": page,
            })))
            .mount(&self.server)
            .await;

            if end == offset {
                break;
            }
            offset = end;
        }
    }

    // =========================================================================
    // GET /v4/apis/detail - API detail
    // =========================================================================

    /// Mock the detail document of one API
    pub async fn mock_detail(&self, product: &str, api_id: &str, detail: Value) {
        Mock::given(method("GET"))
            .and(path("/v4/apis/detail"))
            .and(query_param("product_short", product))
            .and(query_param("name", api_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail))
            .mount(&self.server)
            .await;
    }
}

/// Test data builders for API Explorer payloads
pub struct ExplorerTestData;

impl ExplorerTestData {
    /// One "Storage" group holding the OBS product with two APIs
    pub fn storage_catalog() -> Value {
        json!([
            {
                "id": "storage",
                "name": "Storage",
                "products": [
                    {
                        "name": "OBS",
                        "productshort": "obs",
                        "link": "/obs",
                        "api_count": 2,
                        "has_data": true,
                        "is_recommend": true,
                        "is_global": false
                    }
                ]
            }
        ])
    }

    pub fn api_summary(id: &str, product: &str, version: &str) -> Value {
        json!({
            "id": id,
            "name": id,
            "alias_name": "",
            "method": "GET",
            "summary": format!("{} summary", id),
            "tags": "",
            "product_short": product,
            "info_version": version
        })
    }

    /// Identifiers `Api0000`, `Api0001`, ...
    pub fn api_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Api{:04}", i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api_pages_serves_trailing_empty_page() {
        let mock = MockExplorerServer::start().await;
        mock.mock_api_pages("obs", "", &ExplorerTestData::api_ids(3), 2, 3)
            .await;

        let client = reqwest::Client::new();
        let body: Value = client
            .get(format!("{}/v3/apis?offset=3&limit=2&product_short=obs", mock.uri()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["api_basic_infos"].as_array().unwrap().len(), 0);
        assert_eq!(body["count"], 3);
    }
}
