//! Credentials and the process environment snapshot.

use std::fmt;

use super::defaults;

/// Partially specified API credentials from one configuration source.
///
/// Every field is optional; sources are layered with [`Credentials::or`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// API key
    pub api_key: Option<String>,
    /// API secret for signing and POST authorization
    pub api_secret: Option<String>,
    /// Host name overriding the default API host
    pub api_host_name: Option<String>,
}

impl Credentials {
    /// Fills fields missing from `self` with those from `fallback`.
    ///
    /// Fields already present in `self` always win.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            api_key: self.api_key.or(fallback.api_key),
            api_secret: self.api_secret.or(fallback.api_secret),
            api_host_name: self.api_host_name.or(fallback.api_host_name),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_host_name", &self.api_host_name)
            .finish()
    }
}

/// Snapshot of the `URLBOX_*` environment variables.
///
/// Taken once at startup and passed into configuration resolution, so the
/// library itself never reads the process environment. Empty values count
/// as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Credentials from `URLBOX_API_KEY`, `URLBOX_API_SECRET` and `URLBOX_API_HOST_NAME`
    pub credentials: Credentials,
    /// Secret from `URLBOX_WEBHOOK_SECRET`
    pub webhook_secret: Option<String>,
}

impl Environment {
    /// Reads the variables from the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a snapshot from an arbitrary variable lookup.
    ///
    /// Useful for tests, which should not mutate the real environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            credentials: Credentials {
                api_key: read(defaults::env::API_KEY),
                api_secret: read(defaults::env::API_SECRET),
                api_host_name: read(defaults::env::API_HOST_NAME),
            },
            webhook_secret: read(defaults::env::WEBHOOK_SECRET),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("credentials", &self.credentials)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
