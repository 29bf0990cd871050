use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input is not XML, or has no KML structure we recognize.
    #[error("malformed KML document: {0}")]
    MalformedDocument(String),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("projection failed: {0}")]
    Projection(String),

    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
