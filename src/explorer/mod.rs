//! API Explorer integration module
//!
//! Provides the client and data models for the provider's API Explorer.

pub mod catalog;
pub mod client;
pub mod headers;
pub mod models;
pub mod pagination;

pub use catalog::ApiCatalog;
pub use client::ExplorerClient;
pub use models::*;
