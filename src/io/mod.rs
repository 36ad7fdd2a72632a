//! Event-script loading and result export.

/// CSV motion event scripts.
pub mod events;
/// CSV and JSON export of run records and status snapshots.
pub mod export;

/// Errors raised while reading or writing run artefacts.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("cannot access \"{path}\": {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
