//! Error types for render option validation.

use thiserror::Error;

/// Error type for malformed or incomplete render options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither `url` nor `html` was supplied.
    #[error("Missing url or html entry in options")]
    MissingTarget,

    /// The `url` option does not resolve to a usable host.
    ///
    /// Carries the URL after normalization, so `"FOO"` is reported as
    /// `http://FOO`.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The `format` option cannot be used as a URL path segment.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
