//! Error types for the portfolio enhancer

use thiserror::Error;

/// Result type alias for portfolio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or wiring a portfolio page
#[derive(Error, Debug)]
pub enum Error {
    /// The project source answered with a non-success status
    #[error("Failed to load projects: HTTP status {0}")]
    LoadError(u16),

    /// The project source could not be reached
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The project collection could not be decoded
    #[error("Invalid project data: {0}")]
    ParseError(String),

    /// The host page is missing an element the enhancer needs
    #[error("Page structure error: {0}")]
    PageError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Local file access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl Error {
    /// Whether this error belongs to the "collection load failure" family
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::LoadError(_) | Error::NetworkError(_) | Error::ParseError(_) | Error::Io(_)
        )
    }
}
