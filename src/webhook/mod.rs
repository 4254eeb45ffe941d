//! Webhook callback verification.
//!
//! Urlbox signs each webhook with a header of the form
//! `t=<unix seconds>,sha256=<hex HMAC>`. The HMAC-SHA256 is taken over
//! `"{t}.{payload}"` with the webhook secret, where the payload is the
//! compact JSON serialization of the callback body.
//!
//! # Example
//!
//! ```
//! use urlbox::webhook::{WebhookError, WebhookValidator};
//!
//! let payload = serde_json::json!({"event": "render.succeeded"});
//! let result = WebhookValidator::new().verify("t=abc,sha256=xyz", &payload, "secret");
//!
//! assert_eq!(result, Err(WebhookError::InvalidTimestamp));
//! ```

mod error;
mod validator;


pub use error::WebhookError;
pub use validator::{WebhookHeader, WebhookValidator};

/// Verifies a webhook against the system clock with the default
/// five-minute freshness window.
///
/// # Errors
///
/// See [`WebhookValidator::verify`].
pub fn verify(
    header: &str,
    payload: &serde_json::Value,
    secret: &str,
) -> Result<(), WebhookError> {
    WebhookValidator::new().verify(header, payload, secret)
}
