//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Base URL of the render API, used when no host name is configured.
pub const BASE_API_URL: &str = "https://api.urlbox.io/v1/";

/// Path (relative to the base URL) that accepts render POST requests.
pub const POST_ENDPOINT: &str = "render";

/// Output format used when the options do not name one.
pub const FORMAT: &str = "png";

/// Timeout in seconds for GET, HEAD and DELETE requests.
pub const REQUEST_TIMEOUT_SECS: u64 = 100;

/// Timeout in seconds for render POST requests.
pub const POST_TIMEOUT_SECS: u64 = 5;

/// Webhooks older than this many whole minutes are rejected.
pub const WEBHOOK_MAX_AGE_MINUTES: i64 = 5;

/// Default output path for `urlbox init`.
pub const CONFIG_FILE: &str = "urlbox.toml";

/// Environment variable names read by [`Environment::from_process`](super::Environment::from_process).
pub mod env {
    /// API key.
    pub const API_KEY: &str = "URLBOX_API_KEY";
    /// API secret used for URL signing and POST authorization.
    pub const API_SECRET: &str = "URLBOX_API_SECRET";
    /// Host name overriding the default API host.
    pub const API_HOST_NAME: &str = "URLBOX_API_HOST_NAME";
    /// Secret used to verify webhook signatures.
    pub const WEBHOOK_SECRET: &str = "URLBOX_WEBHOOK_SECRET";
}

/// Default GET/HEAD/DELETE timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

/// Default POST timeout as Duration.
#[must_use]
pub const fn post_timeout() -> Duration {
    Duration::from_secs(POST_TIMEOUT_SECS)
}
