//! Error types for COinS operations.
//!
//! This module provides the [`CoinsError`] type and the [`Result`] convenience type.
//!
//! Building a span never fails: missing metadata degrades to omitted keys or an
//! empty span. Errors only arise while loading configuration or constructing a
//! request context.

use thiserror::Error;

/// Error type for all COinS library operations.
#[derive(Error, Debug)]
pub enum CoinsError {
    /// The request URL is not a valid absolute URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The configuration is structurally valid JSON but semantically unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error for configuration or item files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`CoinsError`].
pub type Result<T> = std::result::Result<T, CoinsError>;
