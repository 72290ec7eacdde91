//! Unified error types for the flashcard viewer.

use std::fmt;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// The card manifest could not be read or parsed
    CardSource(String),
    /// Reading or writing a persisted tag set failed
    TagStore(String),
    /// Error loading or decoding a card image
    ImageLoad(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::CardSource(msg) => write!(f, "Card source error: {}", msg),
            AppError::TagStore(msg) => write!(f, "Tag store error: {}", msg),
            AppError::ImageLoad(msg) => write!(f, "Image load error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageLoad(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
