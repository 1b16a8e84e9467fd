//! UserService Error Types
//!
//! This module defines custom error types for the crate, covering transport
//! failures, URL construction problems, and malformed server replies.

use thiserror::Error;

/// The main Error type for the UserService client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client errors from the reqwest transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors from the stream transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoint URL could not be built from the current settings
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failures not covered by a source error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not valid text
    #[error("Response decoding error: {0}")]
    Decode(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
