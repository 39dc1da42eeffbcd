//! Error types for the YouTube client

use thiserror::Error;

/// Result type alias for YouTube operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting channel descriptions
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Writing description files failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
