//! Command execution.
//!
//! Turns a [`ValidatedCommand`] into API calls or a webhook check and
//! writes the outcome to the given writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use urlbox::client::{Client, ClientError};
use urlbox::config::{
    ConfigError, RenderAction, RenderJob, ValidatedCommand, VerifyJob, WebhookPayload,
    write_default_config,
};
use urlbox::time::Clock;
use urlbox::transport::{HttpClient, HttpResponse, ReqwestClient};
use urlbox::webhook::{WebhookError, WebhookValidator};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The render client rejected the call or could not complete it.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The API answered with a non-success status.
    #[error("Render API returned {status}{}", body_suffix(.body))]
    Status {
        /// Response status
        status: http::StatusCode,
        /// Response body, if it was text
        body: String,
    },

    /// The webhook failed verification.
    #[error("Webhook rejected: {0}")]
    Rejected(#[source] WebhookError),

    /// Writing the configuration template failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the rendered file failed.
    #[error("Failed to write '{}': {source}", path.display())]
    OutputFile {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Executes a validated command against the production HTTP client,
/// writing results to stdout.
///
/// # Errors
///
/// See [`RunError`].
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: ValidatedCommand) -> Result<(), RunError> {
    let mut out = std::io::stdout();

    match command {
        ValidatedCommand::Render(job) => run_render(job, ReqwestClient::new(), &mut out).await,
        ValidatedCommand::Verify(job) => run_verify(&job, &WebhookValidator::new(), &mut out),
        ValidatedCommand::Init { output } => run_init(&output, &mut out),
    }
}

/// Runs one render API operation and reports the response.
///
/// - `url` prints the render URL.
/// - `get` writes the body to the output file, or to `out`.
/// - `head` prints the status line and headers.
/// - `delete` prints the status line.
/// - `post` prints the status line and the body text.
///
/// # Errors
///
/// Returns [`RunError::Status`] for a non-success response, after anything
/// worth showing has been written. A failed `get` writes no body.
pub async fn run_render<H: HttpClient, W: Write>(
    job: RenderJob,
    http: H,
    out: &mut W,
) -> Result<(), RunError> {
    let RenderJob {
        action,
        settings,
        options,
        output,
    } = job;
    let client = Client::with_http_client(settings, http);
    tracing::debug!(%action, options = options.len(), "Running render command");

    match action {
        RenderAction::Url => {
            let url = client.generate_url(options).map_err(ClientError::from)?;
            writeln!(out, "{url}")?;
        }
        RenderAction::Get => {
            let response = ensure_success(client.get(options).await?)?;
            match output {
                Some(path) => {
                    write_file(&path, &response.body)?;
                    tracing::info!(
                        status = %response.status,
                        bytes = response.body.len(),
                        "Render saved to {}",
                        path.display()
                    );
                }
                None => {
                    out.write_all(&response.body)?;
                    out.flush()?;
                }
            }
        }
        RenderAction::Head => {
            let response = client.head(options).await?;
            writeln!(out, "{}", response.status)?;
            for (name, value) in &response.headers {
                writeln!(
                    out,
                    "{}: {}",
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes())
                )?;
            }
            ensure_success(response)?;
        }
        RenderAction::Delete => {
            let response = client.delete(options).await?;
            writeln!(out, "{}", response.status)?;
            ensure_success(response)?;
        }
        RenderAction::Post => {
            let response = client.post(options).await?;
            writeln!(out, "{}", response.status)?;
            if let Some(text) = response.body_text().filter(|t| !t.is_empty()) {
                writeln!(out, "{text}")?;
            }
            ensure_success(response)?;
        }
    }

    Ok(())
}

/// Checks a webhook and prints `valid` when it passes.
///
/// # Errors
///
/// Returns [`RunError::Rejected`] when verification fails.
pub fn run_verify<C: Clock, W: Write>(
    job: &VerifyJob,
    validator: &WebhookValidator<C>,
    out: &mut W,
) -> Result<(), RunError> {
    let result = match &job.payload {
        WebhookPayload::Json(value) => validator.verify(&job.header, value, &job.secret),
        WebhookPayload::Raw(body) => validator.verify_raw(&job.header, body, &job.secret),
    };

    result.map_err(RunError::Rejected)?;
    writeln!(out, "valid")?;
    Ok(())
}

/// Writes the configuration template and reports where it went.
///
/// # Errors
///
/// Returns [`RunError::Config`] if the file cannot be written.
pub fn run_init<W: Write>(path: &Path, out: &mut W) -> Result<(), RunError> {
    write_default_config(path)?;
    writeln!(out, "Configuration template written to: {}", path.display())?;
    Ok(())
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse, RunError> {
    if response.is_success() {
        return Ok(response);
    }

    Err(RunError::Status {
        status: response.status,
        body: response.body_text().unwrap_or_default().trim().to_string(),
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    std::fs::write(path, bytes).map_err(|source| RunError::OutputFile {
        path: path.to_path_buf(),
        source,
    })
}
