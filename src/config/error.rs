//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers missing or malformed credentials, config file problems and
/// malformed command-line input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file (config file or webhook payload).
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A credential needed for the operation was not provided anywhere.
    #[error("Missing {field}: {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A credential was provided but cannot be used.
    #[error("Invalid {field}: {reason}")]
    InvalidCredential {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A `--option` argument is not in `key=value` form.
    #[error("Invalid render option '{value}': expected 'key=value'")]
    InvalidOption {
        /// The argument as given
        value: String,
    },

    /// The webhook payload is not valid JSON.
    #[error("Invalid webhook payload: {reason}")]
    InvalidPayload {
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` and `InvalidCredential` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The API key.
    pub const API_KEY: &str = "api_key";
    /// The API secret.
    pub const API_SECRET: &str = "api_secret";
    /// The API host name.
    pub const API_HOST_NAME: &str = "api_host_name";
    /// The webhook signing secret.
    pub const WEBHOOK_SECRET: &str = "webhook_secret";
}

/// Hints attached to `MissingRequired` errors.
pub mod hint {
    /// How to provide the API key.
    pub const API_KEY: &str =
        "pass --api-key, set api.key in the config file, or set URLBOX_API_KEY";
    /// How to provide the API secret, and why POST needs it.
    pub const API_SECRET_FOR_POST: &str = "required for authorised post requests; pass \
        --api-secret, set api.secret in the config file, or set URLBOX_API_SECRET";
    /// How to provide the webhook secret.
    pub const WEBHOOK_SECRET: &str = "pass --webhook-secret, set webhook.secret in the config \
        file, or set URLBOX_WEBHOOK_SECRET";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }

    /// Creates an `InvalidCredential` error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidCredential {
            field,
            reason: reason.into(),
        }
    }
}
