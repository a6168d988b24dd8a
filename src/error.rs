use std::path::PathBuf;

use thiserror::Error;

/// Why a single season could not be turned into a table.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http {status}")]
    Status { status: u16 },
    #[error("invalid standings payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("no standings returned")]
    Empty,
    #[error("duplicate rank {rank} in standings")]
    RankConflict { rank: i64 },
}

/// Failure reading or writing the persisted season document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed season document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
