//! Scan and configuration errors

use std::path::PathBuf;

use axscan_dom::{NodeId, SelectorError};
use thiserror::Error;

/// Failure to run a scan. Violations are never errors.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid aria pair: {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("scan root {0:?} is not a node of this tree")]
    NodeNotFound(NodeId),
}

/// Failure to load a `ScanConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScanResult<T> = Result<T, ScanError>;
