// File: ./src/error.rs
//! Error kinds raised by the conversion pipeline.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Malformed week selector or time-of-day text.
    #[error("Format error: {0}")]
    Format(String),

    /// The document grid does not match the expected schema.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The term anchor cannot produce a date for the requested week.
    #[error("Resolution error: {0}")]
    Resolution(String),
}

impl ConvertError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
