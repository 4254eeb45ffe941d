//! Validated configuration after merging CLI, TOML and environment sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::options::{OptionValue, RenderOptions};

use super::cli::{Cli, Command, RenderArgs, VerifyArgs};
use super::env::{Credentials, Environment};
use super::error::{ConfigError, field, hint};
use super::settings::ClientSettings;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args, an optional TOML
/// config and the environment snapshot.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// What to do
    pub command: ValidatedCommand,

    /// Verbose logging enabled
    pub verbose: bool,
}

/// A subcommand with all of its inputs resolved.
#[derive(Debug)]
pub enum ValidatedCommand {
    /// A call against the render API
    Render(RenderJob),
    /// A webhook verification
    Verify(VerifyJob),
    /// Write the configuration template
    Init {
        /// Destination path
        output: PathBuf,
    },
}

/// Which render API operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Print the render URL without sending anything
    Url,
    /// GET the render URL
    Get,
    /// HEAD the render URL
    Head,
    /// DELETE the render URL
    Delete,
    /// POST to the render endpoint
    Post,
}

impl fmt::Display for RenderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Url => "url",
            Self::Get => "get",
            Self::Head => "head",
            Self::Delete => "delete",
            Self::Post => "post",
        };
        f.write_str(name)
    }
}

/// Inputs for a render API call.
#[derive(Debug)]
pub struct RenderJob {
    /// Operation to perform
    pub action: RenderAction,
    /// Client settings
    pub settings: ClientSettings,
    /// Unprocessed render options as given on the command line
    pub options: RenderOptions,
    /// Where to write a GET response body; stdout if `None`
    pub output: Option<PathBuf>,
}

/// Webhook payload in the form it should be signed.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// Parsed JSON, re-serialized compactly before signing
    Json(serde_json::Value),
    /// Exact bytes as received
    Raw(Vec<u8>),
}

/// Inputs for a webhook verification.
pub struct VerifyJob {
    /// Signature header value
    pub header: String,
    /// Payload to check the signature against
    pub payload: WebhookPayload,
    /// Webhook signing secret
    pub secret: String,
}

impl fmt::Debug for VerifyJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyJob")
            .field("header", &self.header)
            .field("payload", &self.payload)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.command {
            ValidatedCommand::Render(job) => write!(
                f,
                "Config {{ command: {}, base_url: {}, signed: {}, options: {} }}",
                job.action,
                job.settings.base_url(),
                job.settings.api_secret().is_some(),
                job.options.len(),
            ),
            ValidatedCommand::Verify(job) => write!(
                f,
                "Config {{ command: verify, raw: {} }}",
                matches!(job.payload, WebhookPayload::Raw(_)),
            ),
            ValidatedCommand::Init { output } => {
                write!(f, "Config {{ command: init, output: {} }}", output.display())
            }
        }
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments, an optional TOML
    /// config and the environment snapshot.
    ///
    /// Priority for every credential: CLI > TOML > environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is missing for a render command
    /// - The webhook secret is missing for `verify`
    /// - A `--option` argument is malformed
    /// - The webhook payload cannot be read or is not JSON
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        env: &Environment,
    ) -> Result<Self, ConfigError> {
        let command = match &cli.command {
            Command::Url(args) => Self::render(RenderAction::Url, args, None, cli, toml, env)?,
            Command::Get { render, output } => {
                Self::render(RenderAction::Get, render, output.clone(), cli, toml, env)?
            }
            Command::Head(args) => Self::render(RenderAction::Head, args, None, cli, toml, env)?,
            Command::Delete(args) => {
                Self::render(RenderAction::Delete, args, None, cli, toml, env)?
            }
            Command::Post(args) => Self::render(RenderAction::Post, args, None, cli, toml, env)?,
            Command::Verify(args) => ValidatedCommand::Verify(Self::verify(args, toml, env)?),
            Command::Init { output } => ValidatedCommand::Init {
                output: output.clone(),
            },
        };

        Ok(Self {
            command,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, optional config file and environment.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli, env: &Environment) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref(), env)
    }

    fn render(
        action: RenderAction,
        args: &RenderArgs,
        output: Option<PathBuf>,
        cli: &Cli,
        toml: Option<&TomlConfig>,
        env: &Environment,
    ) -> Result<ValidatedCommand, ConfigError> {
        let settings = ClientSettings::resolve(Self::explicit_credentials(cli, toml), env)?;
        let options = build_render_options(args)?;

        Ok(ValidatedCommand::Render(RenderJob {
            action,
            settings,
            options,
            output,
        }))
    }

    fn explicit_credentials(cli: &Cli, toml: Option<&TomlConfig>) -> Credentials {
        let from_cli = Credentials {
            api_key: cli.api_key.clone(),
            api_secret: cli.api_secret.clone(),
            api_host_name: cli.api_host_name.clone(),
        };

        match toml {
            Some(toml) => from_cli.or(toml.credentials()),
            None => from_cli,
        }
    }

    fn verify(
        args: &VerifyArgs,
        toml: Option<&TomlConfig>,
        env: &Environment,
    ) -> Result<VerifyJob, ConfigError> {
        // Priority: CLI explicit > TOML > environment
        let secret = args
            .webhook_secret
            .clone()
            .or_else(|| toml.and_then(|t| t.webhook.secret.clone()))
            .or_else(|| env.webhook_secret.clone())
            .ok_or_else(|| ConfigError::missing(field::WEBHOOK_SECRET, hint::WEBHOOK_SECRET))?;

        let bytes = match (&args.payload, &args.payload_file) {
            (Some(inline), _) => inline.clone().into_bytes(),
            (None, Some(path)) => read_payload_file(path)?,
            (None, None) => {
                return Err(ConfigError::InvalidPayload {
                    reason: "no payload given; use --payload or --payload-file".to_string(),
                });
            }
        };

        let payload = if args.raw {
            WebhookPayload::Raw(bytes)
        } else {
            let value = serde_json::from_slice(&bytes).map_err(|e| ConfigError::InvalidPayload {
                reason: e.to_string(),
            })?;
            WebhookPayload::Json(value)
        };

        Ok(VerifyJob {
            header: args.header.clone(),
            payload,
            secret,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn read_payload_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Collects `--url`, `--html`, `--option` and `--format` into render options.
///
/// A key given once via `--option` becomes a typed scalar; a key repeated
/// becomes a list of its raw values in the order given.
fn build_render_options(args: &RenderArgs) -> Result<RenderOptions, ConfigError> {
    let mut options = RenderOptions::new();

    if let Some(ref url) = args.url {
        options.insert("url", url.as_str());
    }
    if let Some(ref html) = args.html {
        options.insert("html", html.as_str());
    }

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for raw in &args.options {
        let (key, value) = parse_option_pair(raw)?;
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key, vec![value])),
        }
    }

    for (key, mut values) in grouped {
        let value = if values.len() == 1 {
            parse_scalar(&values.remove(0))
        } else {
            OptionValue::List(values)
        };
        options.insert(key, value);
    }

    if let Some(ref format) = args.format {
        options.insert("format", format.as_str());
    }

    Ok(options)
}

fn parse_option_pair(raw: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::InvalidOption {
        value: raw.to_string(),
    };

    let (key, value) = raw.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }

    Ok((key.to_string(), value.to_string()))
}

/// Types a single `--option` value.
///
/// Numbers are only typed when they print back to exactly the text given,
/// since the printed form is what gets signed. `01234`, `1.50` and `+5`
/// stay text.
fn parse_scalar(value: &str) -> OptionValue {
    match value {
        "true" => return OptionValue::Bool(true),
        "false" => return OptionValue::Bool(false),
        _ => {}
    }

    if let Ok(n) = value.parse::<i64>() {
        if n.to_string() == value {
            return OptionValue::Integer(n);
        }
        return OptionValue::Text(value.to_string());
    }

    let numeric = value.contains(|c: char| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
    if numeric {
        if let Ok(n) = value.parse::<f64>() {
            if n.to_string() == value {
                return OptionValue::Float(n);
            }
        }
    }

    OptionValue::Text(value.to_string())
}
