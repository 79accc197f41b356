//! Full-run integration tests
//!
//! Covers the output directory checks that happen before any request and
//! complete runs in both catalog and single-product mode.

use std::fs;
use std::path::{Path, PathBuf};

use apidump::{Config, ExportError};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use crate::common::{list_files, test_config};
use crate::mocks::{ExplorerTestData, MockExplorerServer};

fn run_config(uri: &str, output: &str, product: Option<&str>) -> Config {
    Config {
        output_dir: PathBuf::from(output),
        product: product.map(str::to_string),
        ..test_config(uri)
    }
}

#[tokio::test]
async fn test_output_outside_executable_dir_aborts_before_network() {
    let mock = MockExplorerServer::start().await;
    mock.mock_catalog(ExplorerTestData::storage_catalog()).await;

    let config = run_config(&mock.uri(), "/tmp/out", None);
    let err = apidump::run(&config, Path::new("/opt/tool"), Path::new("/opt/tool"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::InvalidOutputPath { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_output_that_is_a_file_fails_preparation() {
    let mock = MockExplorerServer::start().await;
    let base = TempDir::new().unwrap();
    fs::write(base.path().join("yaml"), "occupied").unwrap();

    let config = run_config(&mock.uri(), "yaml", None);
    let err = apidump::run(&config, base.path(), base.path())
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_full_run_clears_previous_output() {
    let mock = MockExplorerServer::start().await;
    mock.mock_catalog(ExplorerTestData::storage_catalog()).await;
    mock.mock_versions("obs", &["v1"]).await;
    let ids = vec!["ListBuckets".to_string(), "CreateBucket".to_string()];
    mock.mock_api_pages("obs", "v1", &ids, 100, 2).await;
    mock.mock_detail("obs", "ListBuckets", json!({"id": "ListBuckets", "method": "GET"}))
        .await;
    mock.mock_detail("obs", "CreateBucket", json!({"id": "CreateBucket", "method": "PUT"}))
        .await;

    let base = TempDir::new().unwrap();
    let out = base.path().join("target/yaml");
    fs::create_dir_all(out.join("Old")).unwrap();
    fs::write(out.join("Old/Stale.yaml"), "stale: true\n").unwrap();

    let config = run_config(&mock.uri(), "./target/yaml", None);
    let summary = apidump::run(&config, base.path(), base.path()).await.unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.total(), 2);
    assert_eq!(
        list_files(&out),
        vec![
            PathBuf::from("Storage/obs/v1/CreateBucket.yaml"),
            PathBuf::from("Storage/obs/v1/ListBuckets.yaml"),
        ]
    );
}

#[tokio::test]
async fn test_single_product_run_skips_catalog() {
    let mock = MockExplorerServer::start().await;
    mock.mock_versions("obs", &[]).await;
    mock.mock_api_pages("obs", "", &["ListBuckets".to_string()], 100, 1)
        .await;
    mock.mock_detail("obs", "ListBuckets", json!({"id": "ListBuckets"}))
        .await;

    let base = TempDir::new().unwrap();
    let config = run_config(&mock.uri(), "out", Some("obs"));
    let summary = apidump::run(&config, base.path(), base.path()).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        list_files(&base.path().join("out")),
        vec![PathBuf::from("obs/ListBuckets.yaml")]
    );
    assert!(mock.requests_to("/v4/products").await.is_empty());
}

#[tokio::test]
async fn test_catalog_failure_is_not_fatal() {
    let mock = MockExplorerServer::start().await;
    mock.mock_status("/v4/products", 502).await;

    let base = TempDir::new().unwrap();
    let config = run_config(&mock.uri(), "out", None);
    let summary = apidump::run(&config, base.path(), base.path()).await.unwrap();

    assert_eq!(summary.succeeded, 0);
    assert!(base.path().join("out").is_dir());
}
