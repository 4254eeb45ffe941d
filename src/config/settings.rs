//! Resolved settings for a render client.

use std::fmt;

use http::HeaderValue;

use super::env::{Credentials, Environment};
use super::error::{ConfigError, field, hint};
use crate::endpoint;

/// Everything a [`Client`](crate::client::Client) needs, fully resolved.
///
/// Built once at startup and handed to the client by value; nothing in it
/// changes afterwards.
///
/// # Example
///
/// ```
/// use urlbox::config::ClientSettings;
///
/// let settings = ClientSettings::new("KEY")
///     .unwrap()
///     .with_api_secret("SECRET")
///     .unwrap()
///     .with_api_host_name("api-eu.urlbox.io");
///
/// assert_eq!(settings.base_url(), "https://api-eu.urlbox.io/");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    api_key: String,
    api_secret: Option<String>,
    base_url: String,
}

impl ClientSettings {
    /// Creates settings with the given API key, no secret and the default host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if the key is empty, and
    /// [`ConfigError::InvalidCredential`] if it holds anything other than
    /// ASCII letters, digits, `-`, `_`, `.` or `~`.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::missing(field::API_KEY, hint::API_KEY));
        }
        // The key is the first path segment of every render URL.
        if let Some(c) = api_key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')))
        {
            return Err(ConfigError::invalid(
                field::API_KEY,
                format!("unexpected character {c:?}"),
            ));
        }

        Ok(Self {
            api_key,
            api_secret: None,
            base_url: endpoint::base_url(None),
        })
    }

    /// Sets the API secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCredential`] if the secret cannot be sent
    /// in an `Authorization` header.
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let api_secret = api_secret.into();
        HeaderValue::from_str(&format!("Bearer {api_secret}"))
            .map_err(|e| ConfigError::invalid(field::API_SECRET, e.to_string()))?;

        self.api_secret = Some(api_secret);
        Ok(self)
    }

    /// Points the client at another API host, e.g. `api-eu.urlbox.io`.
    #[must_use]
    pub fn with_api_host_name(mut self, host_name: &str) -> Self {
        self.base_url = endpoint::base_url(Some(host_name));
        self
    }

    /// Resolves settings from explicitly supplied credentials, falling back
    /// to the environment snapshot field by field.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available from either source, or
    /// if a supplied credential is unusable.
    pub fn resolve(explicit: Credentials, env: &Environment) -> Result<Self, ConfigError> {
        let merged = explicit.or(env.credentials.clone());

        let api_key = merged
            .api_key
            .ok_or_else(|| ConfigError::missing(field::API_KEY, hint::API_KEY))?;

        let mut settings = Self::new(api_key)?;

        if let Some(secret) = merged.api_secret {
            settings = settings.with_api_secret(secret)?;
        }

        if let Some(host) = merged.api_host_name {
            if host.trim().is_empty() {
                return Err(ConfigError::invalid(
                    field::API_HOST_NAME,
                    "must not be empty",
                ));
            }
            settings = settings.with_api_host_name(&host);
        }

        Ok(settings)
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API secret, if configured.
    #[must_use]
    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    /// The base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Display for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings {{ base_url: {}, api_key: {}, signed: {} }}",
            self.base_url,
            self.api_key,
            self.api_secret.is_some(),
        )
    }
}
