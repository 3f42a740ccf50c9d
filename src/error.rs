use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run before or between passes.
///
/// Soft failures (bad availability markers, lookup misses, unplaceable hours)
/// are not errors; they are logged and reported as shortfalls.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no instructor data available, cannot build the availability index")]
    NoInstructorData,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed schedule table: {0}")]
    MalformedTable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
