//! Webhook verification error types.

use thiserror::Error;

/// Reasons a webhook callback is rejected.
///
/// The display strings are part of the public contract; callers match on
/// them when reporting back to Urlbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Timestamp part is malformed, unparseable or too old
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Signature part is malformed or does not match the payload
    #[error("Invalid signature")]
    InvalidSignature,
}
