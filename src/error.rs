//! Error types for apidump
//!
//! This module defines the error taxonomy used across the export pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Export pipeline errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Transport failure or non-2xx response
    #[error("request {url} failed: {message}")]
    Fetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// Response body did not match the expected envelope
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Detail document could not be turned into YAML
    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the output dir must be a sub-dir of {}, not {}", base.display(), path.display())]
    InvalidOutputPath { path: PathBuf, base: PathBuf },

    #[error("failed to empty the output dir {}: {reason}", path.display())]
    OutputPreparation { path: PathBuf, reason: String },

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ExportError {
    /// Build a fetch error for a transport-level failure (no status)
    pub fn transport(url: impl Into<String>, err: &reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// Build a fetch error for a non-2xx response
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            url: url.into(),
            status: Some(status),
            message: format!("Response Code {}", status),
        }
    }

    /// HTTP status carried by a fetch error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Process exit code for errors that abort the run
    ///
    /// Only the two output-directory conditions are fatal; everything else
    /// maps to 0 because the traversal logs it and carries on.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidOutputPath { .. } => 1,
            Self::OutputPreparation { .. } => 2,
            _ => 0,
        }
    }
}

/// Result type alias for convenience
pub type ExportResult<T> = Result<T, ExportError>;
