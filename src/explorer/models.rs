//! API Explorer data models
//!
//! Data structures for API Explorer responses and list queries.

use serde::{Deserialize, Serialize};

/// A catalog group bundling related products
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProductGroup {
    pub id: String,
    pub name: String,
    pub products: Vec<Product>,
}

impl ProductGroup {
    /// Directory segment for this group (spaces become underscores)
    pub fn dir_name(&self) -> String {
        sanitize_group_name(&self.name)
    }
}

/// Replace spaces in a group name so it can be used as a path segment
pub fn sanitize_group_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// A cloud service in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Product {
    pub name: String,
    #[serde(rename = "productshort")]
    pub product_short: String,
    pub link: String,
    /// Hint only: used to skip empty products and as a logging total
    pub api_count: usize,
    pub has_data: bool,
    pub is_recommend: bool,
    pub is_global: bool,
}

/// Response from `GET /v4/products`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub groups: Vec<ProductGroup>,
}

/// One API version of a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProductVersion {
    pub name: String,
    pub description: String,
}

/// Response from `GET /v2/versions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VersionsResponse {
    pub count: usize,
    pub is_multiple_version: bool,
    pub versions: Vec<ProductVersion>,
}

impl VersionsResponse {
    /// Version names, or a single empty version when the product has none
    pub fn version_names(self) -> Vec<String> {
        let names: Vec<String> = self.versions.into_iter().map(|v| v.name).collect();
        if names.is_empty() {
            vec![String::new()]
        } else {
            names
        }
    }
}

/// Summary record of one API as returned by the list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "alias_name")]
    pub alias: String,
    pub method: String,
    pub summary: String,
    pub tags: String,
    pub product_short: String,
    #[serde(rename = "info_version")]
    pub version: String,
}

impl ApiSummary {
    /// Identifier used for the detail lookup and the output file name
    ///
    /// This is the API's operation name; the opaque `id` is only used when
    /// the record carries no `name`.
    pub fn identifier(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Response from `GET /v3/apis`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiListResponse {
    pub count: usize,
    pub api_basic_infos: Vec<ApiSummary>,
}

/// Query options for one page of the API list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListApiOptions {
    pub offset: usize,
    pub limit: usize,
    pub product_short: String,
    pub version: String,
}

impl ListApiOptions {
    /// Query parameters for this page; empty filters are left out
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if !self.product_short.is_empty() {
            params.push(("product_short", self.product_short.clone()));
        }
        if !self.version.is_empty() {
            params.push(("info_version", self.version.clone()));
        }

        params
    }
}

/// Query options for one API detail document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailOptions<'a> {
    pub product_short: &'a str,
    pub name: &'a str,
    pub version: &'a str,
    pub region: Option<&'a str>,
}

impl DetailOptions<'_> {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("product_short", self.product_short.to_string()),
            ("name", self.name.to_string()),
        ];

        if let Some(region) = self.region.filter(|r| !r.is_empty()) {
            params.push(("region_id", region.to_string()));
        }
        if !self.version.is_empty() {
            params.push(("info_version", self.version.to_string()));
        }

        params
    }
}
