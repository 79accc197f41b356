//! apidump - API Explorer YAML exporter
//!
//! This is the main entry point for the export binary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use apidump::{Args, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let (config, base_dir, cwd) = match startup(args) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting apidump export");

    match apidump::run(&config, &base_dir, &cwd).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Export aborted");
            match e.exit_code() {
                0 => ExitCode::FAILURE,
                code => ExitCode::from(code),
            }
        }
    }
}

/// Initialize tracing; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apidump=info".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Load configuration and locate the executable and working directories
fn startup(args: Args) -> Result<(Config, PathBuf, PathBuf)> {
    let config = Config::from_env()?.with_args(args);

    let exe = std::env::current_exe().context("Cannot locate the executable")?;
    let base_dir = exe
        .parent()
        .map(PathBuf::from)
        .context("Executable has no parent directory")?;
    let cwd = std::env::current_dir().context("Cannot read the working directory")?;

    Ok((config, base_dir, cwd))
}
