//! HMAC helpers for request signing and webhook verification.
//!
//! Render URLs are authenticated with HMAC-SHA1 over the URL-encoded
//! options; webhook callbacks are signed with HMAC-SHA256. Both produce
//! lowercase hex digests.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Computes the signing token for a render URL.
///
/// Returns the hex-encoded HMAC-SHA1 of `encoded_options` keyed by `secret`.
///
/// # Example
///
/// ```
/// let token = urlbox::signing::sign("SECRET", "url=https%3A%2F%2Fexample.com&format=png");
/// assert_eq!(token.len(), 40);
/// ```
#[must_use]
pub fn sign(secret: &str, encoded_options: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(encoded_options.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Returns the hex-encoded HMAC-SHA256 of `message` keyed by `secret`.
#[must_use]
pub fn sign_sha256(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two digests without short-circuiting on the first differing byte.
///
/// Length differences are not hidden.
#[must_use]
pub fn digests_match(expected: &str, received: &str) -> bool {
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
