//! Configuration management for apidump
//!
//! Configuration is loaded from environment variables, then the command-line
//! flags are layered on top.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::cli::Args;

/// Public API Explorer host
pub const DEFAULT_BASE_URL: &str = "https://apiexplorer.developer.huaweicloud.com";

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "./target/yaml";

/// Page size used by the API lister
pub const MAX_PAGE_SIZE: usize = 100;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API Explorer base URL
    pub base_url: String,
    /// Directory the YAML tree is written into
    pub output_dir: PathBuf,
    /// Send `X-Language: en-us` with every request
    pub english: bool,
    /// Restrict the run to one product short code
    pub product: Option<String>,

    /// Region passed to detail requests
    pub region: Option<String>,
    /// Token sent as `X-Auth-Token`
    pub auth_token: Option<String>,

    /// Client-level timeout for each request (in seconds)
    pub timeout_seconds: u64,
    /// Records requested per page
    pub page_size: usize,
    /// Hard cap on pages fetched for one (product, version)
    pub max_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            english: false,
            product: None,
            region: None,
            auth_token: None,
            timeout_seconds: 60,
            page_size: MAX_PAGE_SIZE,
            max_pages: 1000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            base_url: non_empty("API_EXPLORER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),

            region: non_empty("HW_REGION"),
            auth_token: non_empty("HW_TOKEN"),

            timeout_seconds: non_empty("EXPORT_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "60".to_string())
                .parse()
                .context("Invalid EXPORT_TIMEOUT_SECONDS")?,
            max_pages: non_empty("EXPORT_MAX_PAGES")
                .unwrap_or_else(|| "1000".to_string())
                .parse()
                .context("Invalid EXPORT_MAX_PAGES")?,

            ..defaults
        })
    }

    /// Apply command-line flags on top of the environment settings
    pub fn with_args(mut self, args: Args) -> Self {
        self.output_dir = args.output;
        self.english = args.english;
        self.product = args.product.filter(|p| !p.is_empty());
        self
    }
}
