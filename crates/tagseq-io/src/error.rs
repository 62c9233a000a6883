use thiserror::Error;

/// Result type local to tagseq-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Core(#[from] tagseq_core::Error),
}
