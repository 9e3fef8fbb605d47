//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`, keeping error sites clean with `?`.

use thiserror::Error;

/// Errors produced by `rail-core` parsing and configuration checks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rail-core`.
pub type CoreResult<T> = Result<T, CoreError>;
