use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The table no longer exists (deleted between discovery and the
    /// metrics fetch). Recoverable: the caller skips the table.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Any other metadata or telemetry failure (throttling, permission
    /// denial, transient network fault). Not recovered; aborts the run.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
