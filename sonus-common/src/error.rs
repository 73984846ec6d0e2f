use thiserror::Error;

/// Common error type for the Sonus exporter crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
