//! Run orchestration
//!
//! Checks and prepares the output directory before any network activity,
//! then exports either the whole catalog or a single product.

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::ExportResult;
use crate::explorer::ExplorerClient;
use crate::export::{ExportSummary, Exporter};
use crate::output;

/// Run one export
///
/// `base_dir` is the directory the output must live under (the executable's
/// directory); relative output paths resolve against `cwd`. Errors returned
/// here are fatal; `ExportError::exit_code` gives the process status.
pub async fn run(config: &Config, base_dir: &Path, cwd: &Path) -> ExportResult<ExportSummary> {
    let output_dir = output::resolve_output_dir(&config.output_dir, base_dir, cwd)?;
    info!(path = %output_dir.display(), "the output dir is {}", output_dir.display());

    output::prepare_output_dir(&output_dir)?;

    let client = ExplorerClient::new(config)?;
    let exporter = Exporter::new(client, config.region.clone());

    let summary = match config.product.as_deref() {
        Some(product) => exporter.export_product(&output_dir, product).await,
        None => match exporter.export_all(&output_dir).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Catalog scan aborted");
                ExportSummary::default()
            }
        },
    };

    info!(
        succeeded = summary.succeeded,
        attempted = summary.attempted,
        failed = summary.failed,
        "Export finished"
    );
    Ok(summary)
}
