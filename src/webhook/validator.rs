//! Signature header parsing and verification.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::defaults;
use crate::signing;
use crate::time::{Clock, SystemClock};

use super::WebhookError;

static TIMESTAMP_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^t=([0-9]+)$").expect("timestamp pattern is valid"));

static SIGNATURE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sha256=([0-9a-zA-Z]{40,})$").expect("signature pattern is valid")
});

/// Timestamp taken from the `t=` part of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Timestamp {
    digits: String,
    seconds: i64,
}

/// A syntactically valid webhook signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeader {
    timestamp: Timestamp,
    signature: String,
}

impl WebhookHeader {
    /// Parses `t=<digits>,sha256=<digest>`.
    ///
    /// Only the format is checked here; freshness and the digest itself are
    /// checked by [`WebhookValidator`].
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidTimestamp`] if the timestamp part is
    /// malformed, otherwise [`WebhookError::InvalidSignature`] if the
    /// signature part is.
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let (timestamp_part, signature_part) = split_header(raw);
        let timestamp = parse_timestamp(timestamp_part)?;
        let signature = parse_signature(signature_part)?;

        Ok(Self {
            timestamp,
            signature: signature.to_string(),
        })
    }

    /// Seconds since the Unix epoch at which the webhook was signed.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp.seconds
    }

    /// Hex digest carried by the header.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Splits on the first comma. A header without one yields an empty
/// signature part.
fn split_header(raw: &str) -> (&str, &str) {
    raw.split_once(',').unwrap_or((raw, ""))
}

fn parse_timestamp(part: &str) -> Result<Timestamp, WebhookError> {
    let digits = TIMESTAMP_PART
        .captures(part)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(WebhookError::InvalidTimestamp)?;

    let seconds = digits
        .parse::<i64>()
        .map_err(|_| WebhookError::InvalidTimestamp)?;

    Ok(Timestamp {
        digits: digits.to_string(),
        seconds,
    })
}

fn parse_signature(part: &str) -> Result<&str, WebhookError> {
    SIGNATURE_PART
        .captures(part)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(WebhookError::InvalidSignature)
}

/// Checks webhook signatures and their freshness.
///
/// # Example
///
/// ```
/// use urlbox::time::FixedClock;
/// use urlbox::webhook::{WebhookError, WebhookValidator};
///
/// let validator = WebhookValidator::new().with_clock(FixedClock::at(1_700_000_000));
/// let payload = serde_json::json!({});
///
/// // Well-formed but wrong digest
/// let header = format!("t=1700000000,sha256={}", "0".repeat(64));
/// assert_eq!(
///     validator.verify(&header, &payload, "secret"),
///     Err(WebhookError::InvalidSignature),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WebhookValidator<C = SystemClock> {
    clock: C,
    max_age_minutes: i64,
}

impl WebhookValidator {
    /// Creates a validator using the system clock and a five-minute window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clock: SystemClock,
            max_age_minutes: defaults::WEBHOOK_MAX_AGE_MINUTES,
        }
    }
}

impl Default for WebhookValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> WebhookValidator<C> {
    /// Replaces the clock used for the freshness check.
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> WebhookValidator<D> {
        WebhookValidator {
            clock,
            max_age_minutes: self.max_age_minutes,
        }
    }

    /// Sets how many whole minutes old a webhook may be.
    #[must_use]
    pub const fn with_max_age_minutes(mut self, minutes: i64) -> Self {
        self.max_age_minutes = minutes;
        self
    }

    /// Verifies a webhook whose body has been parsed as JSON.
    ///
    /// The payload is re-serialized compactly before signing.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// 1. Timestamp part malformed: [`WebhookError::InvalidTimestamp`]
    /// 2. Timestamp too old: [`WebhookError::InvalidTimestamp`]
    /// 3. Signature part malformed: [`WebhookError::InvalidSignature`]
    /// 4. Digest mismatch: [`WebhookError::InvalidSignature`]
    pub fn verify(
        &self,
        header: &str,
        payload: &serde_json::Value,
        secret: &str,
    ) -> Result<(), WebhookError> {
        self.verify_raw(header, payload.to_string().as_bytes(), secret)
    }

    /// Verifies a webhook against the exact body bytes.
    ///
    /// # Errors
    ///
    /// Same as [`WebhookValidator::verify`].
    pub fn verify_raw(&self, header: &str, body: &[u8], secret: &str) -> Result<(), WebhookError> {
        let (timestamp_part, signature_part) = split_header(header);

        let timestamp = parse_timestamp(timestamp_part).inspect_err(|_| {
            debug!("Webhook rejected: malformed timestamp");
        })?;
        self.check_fresh(timestamp.seconds)?;

        let received = parse_signature(signature_part).inspect_err(|_| {
            debug!("Webhook rejected: malformed signature");
        })?;

        let mut message = Vec::with_capacity(timestamp.digits.len() + 1 + body.len());
        message.extend_from_slice(timestamp.digits.as_bytes());
        message.push(b'.');
        message.extend_from_slice(body);

        let expected = signing::sign_sha256(secret, &message);
        if !signing::digests_match(&expected, received) {
            debug!("Webhook rejected: signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        debug!(timestamp = timestamp.seconds, "Webhook signature verified");
        Ok(())
    }

    fn check_fresh(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = self.clock.unix_seconds();
        // Truncating division: 5m59s still counts as five minutes.
        let age_minutes = now.saturating_sub(timestamp) / 60;

        if age_minutes > self.max_age_minutes {
            debug!(age_minutes, "Webhook rejected: timestamp too old");
            return Err(WebhookError::InvalidTimestamp);
        }
        Ok(())
    }
}
