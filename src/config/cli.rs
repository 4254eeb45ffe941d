//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// urlbox: render screenshots through the Urlbox API
///
/// Generates signed render URLs, issues render requests and verifies
/// webhook callbacks.
#[derive(Debug, Parser)]
#[command(name = "urlbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API key (falls back to URLBOX_API_KEY)
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// API secret used to sign URLs and authorise POST requests (falls back to URLBOX_API_SECRET)
    #[arg(long = "api-secret", global = true)]
    pub api_secret: Option<String>,

    /// API host name, e.g. api-eu.urlbox.io (falls back to URLBOX_API_HOST_NAME)
    #[arg(long = "api-host-name", global = true)]
    pub api_host_name: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for urlbox
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the render URL for the given options
    Url(RenderArgs),

    /// Render and download the screenshot
    Get {
        /// Render options
        #[command(flatten)]
        render: RenderArgs,

        /// Write the response body to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Send a HEAD request for the render URL
    Head(RenderArgs),

    /// Delete a cached render
    Delete(RenderArgs),

    /// Queue an asynchronous render (requires the API secret)
    Post(RenderArgs),

    /// Verify a webhook callback signature
    Verify(VerifyArgs),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Render options shared by the request subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Page to render
    #[arg(long)]
    pub url: Option<String>,

    /// Raw HTML to render instead of a URL
    #[arg(long)]
    pub html: Option<String>,

    /// Output format (default: png)
    #[arg(long)]
    pub format: Option<String>,

    /// Extra render option in 'key=value' format (can be specified multiple times)
    #[arg(long = "option", short = 'O', value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

/// Arguments for the `verify` subcommand.
#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Signature header value, e.g. 't=1700000000,sha256=...'
    #[arg(long)]
    pub header: String,

    /// Webhook payload as a JSON string
    #[arg(long, conflicts_with = "payload_file", required_unless_present = "payload_file")]
    pub payload: Option<String>,

    /// File containing the webhook payload
    #[arg(long = "payload-file")]
    pub payload_file: Option<PathBuf>,

    /// Webhook secret (falls back to URLBOX_WEBHOOK_SECRET)
    #[arg(long = "webhook-secret")]
    pub webhook_secret: Option<String>,

    /// Sign the payload bytes exactly as given instead of re-serialized JSON
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
