//! Error types for text processing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl From<TextProcessingError> for chat_context_core::Error {
    fn from(err: TextProcessingError) -> Self {
        chat_context_core::Error::Config(err.to_string())
    }
}
