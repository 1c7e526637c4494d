//! Core error type.
//!
//! Covers the configuration layer only.  Routing failures live in
//! `rr_spatial::SpatialError`; the binary composes both.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `rr-core`.
pub type RrResult<T> = Result<T, RrError>;
