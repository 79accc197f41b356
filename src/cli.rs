//! Command-line flags

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_OUTPUT_DIR;

#[derive(Debug, Clone, Parser)]
#[command(name = "apidump", version, about = "Export API Explorer details as YAML files")]
pub struct Args {
    /// The output dir
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// English version
    #[arg(short = 'e', long = "english")]
    pub english: bool,

    /// The product short code, e.g. ecs, vpc
    #[arg(long)]
    pub product: Option<String>,
}
