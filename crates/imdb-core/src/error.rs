//! Error types for the IMDb scraper
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for IMDb scraper operations
#[derive(Error, Debug)]
pub enum ImdbError {
    /// Odd-length key/value parameter list
    #[error("invalid params length {0}")]
    InvalidParams(usize),

    /// HTTP request failed (network error, timeout, canceled exchange)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("status code {0} != 2xx")]
    Status(u16),

    /// Failed to parse HTML content
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    /// Invalid URL format
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Cache transport I/O failure
    #[error("cache I/O failed: {0}")]
    Cache(#[from] std::io::Error),

    /// OMDb API returned an error payload
    #[error("omdb error: {0}")]
    Omdb(String),
}

/// Result type alias for IMDb scraper operations
pub type Result<T> = std::result::Result<T, ImdbError>;
