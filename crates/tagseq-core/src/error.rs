use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two containers that must be index-aligned have different lengths.
    #[error("length mismatch: {tags} tags vs {values} values")]
    LengthMismatch { tags: usize, values: usize },

    /// A tag is smaller than its predecessor.
    #[error("tags are not sorted: tag at row {index} is smaller than the one before it")]
    Unsorted { index: usize },

    #[error("row {index} is out of bounds for a sequence of {len} rows")]
    OutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
