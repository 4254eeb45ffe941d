//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use urlbox::client::ClientError;
use urlbox::config::ConfigError;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing credentials, bad options, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, non-success API status, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Webhook failed verification (exit code 3).
    pub fn webhook_rejected() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Exit code class for a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Bad input or missing credentials
    Config,
    /// Transport or API failure
    Runtime,
    /// Webhook did not verify
    Rejected,
}

impl Failure {
    /// Classifies a run error.
    pub const fn of(error: &RunError) -> Self {
        match error {
            RunError::Client(ClientError::Config(_) | ClientError::Validation(_))
            | RunError::Config(_) => Self::Config,
            RunError::Rejected(_) => Self::Rejected,
            _ => Self::Runtime,
        }
    }

    /// The process exit code for this class.
    pub fn exit_code(self) -> std::process::ExitCode {
        match self {
            Self::Config => exit_code::CONFIG_ERROR,
            Self::Runtime => exit_code::runtime_error(),
            Self::Rejected => exit_code::webhook_rejected(),
        }
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'urlbox init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so rendered output on stdout stays clean.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
