//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use super::env::Credentials;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials section
    #[serde(default)]
    pub api: ApiSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API credentials section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API key
    pub key: Option<String>,

    /// API secret
    pub secret: Option<String>,

    /// API host name override
    pub host_name: Option<String>,
}

/// Webhook verification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook signing secret
    pub secret: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// The credentials named in the `[api]` section.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api.key.clone(),
            api_secret: self.api.secret.clone(),
            api_host_name: self.api.host_name.clone(),
        }
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# urlbox configuration file
#
# Values here override the URLBOX_* environment variables and are
# themselves overridden by command-line flags.

[api]
# API key (required for url/get/head/delete/post)
# key = "your-api-key"

# API secret: signs render URLs and authorises POST requests
# secret = "your-api-secret"

# Alternative API host (default: https://api.urlbox.io/v1/)
# host_name = "api-eu.urlbox.io"

[webhook]
# Secret used to verify webhook signatures
# secret = "your-webhook-secret"
"#
    .to_string()
}
