//! apidump - export a cloud API Explorer catalog as YAML
//!
//! This library walks the provider's product catalog, resolves each
//! product's API versions, pages through its API list and writes every API
//! detail document as a YAML file in a directory tree mirroring the catalog.

pub mod app;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod explorer;
pub mod export;
pub mod output;

pub use crate::app::run;
pub use crate::cli::Args;
pub use crate::config::Config;
pub use crate::error::{ExportError, ExportResult};
pub use crate::explorer::{ApiCatalog, ExplorerClient};
pub use crate::export::{ExportSummary, Exporter};
