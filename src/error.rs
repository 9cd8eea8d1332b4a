use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid csv row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("assessment not found: {0}")]
    AssessmentNotFound(String),

    #[error("invalid date: {0} (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate(String),
}
