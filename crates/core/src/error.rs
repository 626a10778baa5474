//! Error types shared across crates

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Static configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// The context store could not be reached or a write failed
    #[error("Context store unavailable: {0}")]
    StoreUnavailable(String),

    /// The intent/entity classifier failed
    #[error("Classifier error: {0}")]
    Classifier(String),
}

impl Error {
    /// Whether the error came from the persistence collaborator
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
