//! Error types for calmare-highlight
//!
//! Classification itself never fails; these cover the host surfaces
//! around it (configuration, grammar construction, I/O).

use thiserror::Error;

/// Result type alias for highlighter operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No grammar registered for language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown grammar edition: {0}")]
    UnknownEdition(String),

    #[error("{0}")]
    Message(String),
}
