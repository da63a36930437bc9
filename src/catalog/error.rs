//! Error types for catalog operations

use std::fmt;

/// Error types for remote catalog access
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// Request never produced a response (connect failure, timeout, DNS)
    RequestFailed(String),
    /// Server answered with a non-success status
    BadStatus(u16, String),
    /// Response body could not be decoded
    InvalidResponse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            CatalogError::BadStatus(status, url) => {
                write!(f, "Server returned status {} for {}", status, url)
            }
            CatalogError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}
