//! Catalog traversal and YAML export
//!
//! The exporter walks catalog groups, products, versions and API summaries
//! strictly in order. Each product is exported as a lazy stream of attempts;
//! a failure at any level is logged and the walk moves on to the next
//! sibling.

use std::fmt;
use std::path::{Path, PathBuf};

use async_stream::stream;
use futures::{pin_mut, Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::convert::json_to_yaml;
use crate::error::{ExportError, ExportResult};
use crate::explorer::{ApiCatalog, ApiSummary};
use crate::output;

/// A successfully written API detail document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiExport {
    pub product: String,
    pub version: String,
    pub api_id: String,
    pub path: PathBuf,
}

/// Level of the traversal a failure happened at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    Product {
        product: String,
    },
    Version {
        product: String,
        version: String,
    },
    Api {
        product: String,
        version: String,
        api_id: String,
    },
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product { product } => write!(f, "product {}", product),
            Self::Version { product, version } => {
                write!(f, "product {} version {:?}", product, version)
            }
            Self::Api {
                product,
                version,
                api_id,
            } => write!(f, "API {} of {} version {:?}", api_id, product, version),
        }
    }
}

/// A failure together with where it happened
#[derive(Debug)]
pub struct ExportFailure {
    pub scope: ExportScope,
    pub error: ExportError,
}

/// Outcome of one step of the product traversal
pub type ExportAttempt = Result<ApiExport, ExportFailure>;

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Sum of the catalog's API counts over the products visited
    pub catalog_total: usize,
    /// API detail exports attempted
    pub attempted: usize,
    /// YAML files written
    pub succeeded: usize,
    /// Failures at any level
    pub failed: usize,
}

impl ExportSummary {
    /// Fold one attempt into the counters
    pub fn record(&mut self, attempt: &ExportAttempt) {
        match attempt {
            Ok(_) => {
                self.attempted += 1;
                self.succeeded += 1;
            }
            Err(failure) => {
                if matches!(failure.scope, ExportScope::Api { .. }) {
                    self.attempted += 1;
                }
                self.failed += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &ExportSummary) {
        self.catalog_total += other.catalog_total;
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }

    /// Denominator of the final report: the catalog total when known
    pub fn total(&self) -> usize {
        if self.catalog_total > 0 {
            self.catalog_total
        } else {
            self.attempted
        }
    }
}

/// Walks an [`ApiCatalog`] and writes one YAML file per API
pub struct Exporter<C> {
    catalog: C,
    region: Option<String>,
}

impl<C: ApiCatalog> Exporter<C> {
    pub fn new(catalog: C, region: Option<String>) -> Self {
        Self { catalog, region }
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Export every product of every catalog group under `output_dir`
    ///
    /// Only a failure to fetch the catalog itself is returned as an error.
    pub async fn export_all(&self, output_dir: &Path) -> ExportResult<ExportSummary> {
        let groups = self.catalog.fetch_catalog().await?;

        let mut summary = ExportSummary::default();

        for (i, group) in groups.iter().enumerate() {
            info!(index = i, group = %group.name, "Scanning catalog group");

            let group_dir = match output::join_segment(output_dir, &group.dir_name(), "group") {
                Ok(dir) => dir,
                Err(e) => {
                    warn!(error = %e, "Skipping catalog group");
                    continue;
                }
            };
            if let Err(e) = output::ensure_dir(&group_dir) {
                warn!(error = %e, "Failed to create group directory");
            }

            for (j, product) in group.products.iter().enumerate() {
                info!(
                    index = j,
                    product = %product.name,
                    short = %product.product_short,
                    api_count = product.api_count,
                    "Scanning product"
                );

                if product.api_count == 0 {
                    continue;
                }

                let mut product_summary = self
                    .export_product(&group_dir, &product.product_short)
                    .await;
                product_summary.catalog_total = product.api_count;
                summary.merge(&product_summary);
            }
        }

        info!(
            succeeded = summary.succeeded,
            total = summary.total(),
            "total APIs: {} / {}",
            summary.succeeded,
            summary.total()
        );
        Ok(summary)
    }

    /// Export one product under `base_dir`, logging every failure
    pub async fn export_product(&self, base_dir: &Path, product: &str) -> ExportSummary {
        let mut summary = ExportSummary::default();

        let attempts = self.product_attempts(base_dir, product);
        pin_mut!(attempts);

        while let Some(attempt) = attempts.next().await {
            summary.record(&attempt);
            match &attempt {
                Ok(export) => debug!(path = %export.path.display(), "Saved API detail"),
                Err(failure) => warn!(error = %failure.error, "Failed to export {}", failure.scope),
            }
        }

        info!(product = %product, count = summary.succeeded, "{} service has {} APIs", product, summary.succeeded);
        summary
    }

    /// Lazy stream of export attempts for one product
    ///
    /// An unusable product name or a version-resolution failure ends the
    /// stream after one product-scoped failure. An unusable version name or a
    /// failed or empty API list skips only that version.
    pub fn product_attempts<'a>(
        &'a self,
        base_dir: &'a Path,
        product: &'a str,
    ) -> impl Stream<Item = ExportAttempt> + 'a {
        stream! {
            if let Err(error) = output::join_segment(base_dir, product, "product") {
                yield Err(ExportFailure {
                    scope: ExportScope::Product { product: product.to_string() },
                    error,
                });
                return;
            }

            let versions = match self.catalog.fetch_versions(product).await {
                Ok(versions) => versions,
                Err(error) => {
                    yield Err(ExportFailure {
                        scope: ExportScope::Product { product: product.to_string() },
                        error,
                    });
                    return;
                }
            };

            if versions.len() > 1 {
                debug!(product = %product, versions = ?versions, "Service has multiple API versions");
            }

            for version in versions {
                let dir = match output::version_dir(base_dir, product, &version) {
                    Ok(dir) => dir,
                    Err(error) => {
                        yield Err(ExportFailure {
                            scope: ExportScope::Version {
                                product: product.to_string(),
                                version: version.clone(),
                            },
                            error,
                        });
                        continue;
                    }
                };

                let apis = match self.catalog.list_apis(product, &version).await {
                    Ok(apis) => apis,
                    Err(error) => {
                        yield Err(ExportFailure {
                            scope: ExportScope::Version {
                                product: product.to_string(),
                                version: version.clone(),
                            },
                            error,
                        });
                        continue;
                    }
                };

                if apis.is_empty() {
                    debug!(product = %product, version = %version, "Service has 0 API");
                    continue;
                }

                if let Err(error) = output::ensure_dir(&dir) {
                    yield Err(ExportFailure {
                        scope: ExportScope::Version {
                            product: product.to_string(),
                            version: version.clone(),
                        },
                        error,
                    });
                    continue;
                }

                for summary in &apis {
                    yield self.export_api(&dir, product, &version, summary).await;
                }
            }
        }
    }

    /// Fetch, convert and write a single API detail document
    async fn export_api(
        &self,
        dir: &Path,
        product: &str,
        version: &str,
        summary: &ApiSummary,
    ) -> ExportAttempt {
        let api_id = summary.identifier();
        let fail = |error: ExportError| ExportFailure {
            scope: ExportScope::Api {
                product: product.to_string(),
                version: version.to_string(),
                api_id: api_id.to_string(),
            },
            error,
        };

        let path = output::api_file_path(dir, api_id).map_err(fail)?;
        let detail = self
            .catalog
            .fetch_detail(product, api_id, version, self.region.as_deref())
            .await
            .map_err(fail)?;
        let yaml = json_to_yaml(&detail).map_err(fail)?;
        output::write_yaml(&path, &yaml).map_err(fail)?;

        Ok(ApiExport {
            product: product.to_string(),
            version: version.to_string(),
            api_id: api_id.to_string(),
            path,
        })
    }
}
