//! Fetch error type for retry classification and fallback logging.

use thiserror::Error;

use crate::url_model::DataUrlError;

/// Error returned when a resource cannot be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Reading a `file:` resource failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The URL could not be parsed or mapped to a local path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// An inline `data:` URL (or placeholder) was malformed.
    #[error("data URL: {0}")]
    DataUrl(#[from] DataUrlError),
    /// No fetch backend for this scheme.
    #[error("unsupported scheme: {0}")]
    Unsupported(String),
}
