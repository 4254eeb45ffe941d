//! Configuration layer for urlbox.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - The environment snapshot ([`Environment`], [`Credentials`])
//! - Resolved client settings ([`ClientSettings`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Credentials are resolved field by field with the following priority
//! (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--api-key`, `--api-secret`, `--api-host-name`, `--webhook-secret`
//! 2. **TOML config file** - the `[api]` and `[webhook]` sections
//! 3. **Environment** - `URLBOX_API_KEY`, `URLBOX_API_SECRET`, `URLBOX_API_HOST_NAME`,
//!    `URLBOX_WEBHOOK_SECRET`
//! 4. **Built-in defaults** - only the API host has one
//!
//! The environment is read once, in `main`, into an [`Environment`] value.
//! Library code never consults the process environment directly.

mod cli;
pub mod defaults;
mod env;
mod error;
mod settings;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command, RenderArgs, VerifyArgs};
pub use env::{Credentials, Environment};
pub use error::{ConfigError, field, hint};
pub use settings::ClientSettings;
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{
    RenderAction, RenderJob, ValidatedCommand, ValidatedConfig, VerifyJob, WebhookPayload,
    write_default_config,
};
