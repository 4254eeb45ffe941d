//! Error type for render client operations.

use thiserror::Error;

use crate::config::ConfigError;
use crate::options::ValidationError;
use crate::transport::HttpError;

/// Everything a [`Client`](super::Client) call can fail with.
///
/// A response with a non-2xx status is not an error; it comes back as an
/// [`HttpResponse`](crate::transport::HttpResponse).
#[derive(Debug, Error)]
pub enum ClientError {
    /// A credential the operation needs is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The render options were rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be completed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The POST body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
