//! Normalization and validation of render options.

use url::Url;

use super::{OptionValue, RenderOptions, ValidationError};
use crate::config::defaults;

/// Render options that passed validation, ready to be encoded or sent.
///
/// The `url` entry (if any) holds the normalized URL and a `format` entry
/// is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedOptions {
    options: RenderOptions,
    format: String,
}

impl ProcessedOptions {
    /// The normalized option mapping, suitable for a JSON body.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The output format, e.g. `png` or `pdf`.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The URL-encoded query string. This is the string that gets signed.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.options.to_query_string()
    }

    /// Splits into the option mapping and the format.
    #[must_use]
    pub fn into_parts(self) -> (RenderOptions, String) {
        (self.options, self.format)
    }
}

/// Validates and normalizes render options.
///
/// - Either `url` or `html` must be present.
/// - `url` is trimmed, gets `http://` prepended when it has no scheme, and
///   must have a host containing a `.`.
/// - `format` defaults to `png` and is appended last when absent. A supplied
///   format may only contain ASCII letters, digits, `_` and `-`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingTarget`] when both `url` and `html` are
/// absent, [`ValidationError::InvalidUrl`] when `url` fails validation and
/// [`ValidationError::InvalidFormat`] when `format` is not a plain name.
///
/// # Example
///
/// ```
/// use urlbox::options::{RenderOptions, process};
///
/// let processed = process(RenderOptions::new().with("url", " www.example.com ")).unwrap();
///
/// assert_eq!(processed.format(), "png");
/// assert_eq!(
///     processed.query_string(),
///     "url=http%3A%2F%2Fwww.example.com&format=png"
/// );
/// ```
pub fn process(mut options: RenderOptions) -> Result<ProcessedOptions, ValidationError> {
    if !options.contains_key("url") && !options.contains_key("html") {
        return Err(ValidationError::MissingTarget);
    }

    if let Some(raw) = options.get("url") {
        let normalized = normalize_url(raw)?;
        options.insert("url", normalized);
    }

    let format = match options.get("format").and_then(OptionValue::query_value) {
        Some(format) if is_format_name(&format) => format.into_owned(),
        Some(format) => return Err(ValidationError::InvalidFormat(format.into_owned())),
        None => {
            options.insert("format", defaults::FORMAT);
            defaults::FORMAT.to_string()
        }
    };

    Ok(ProcessedOptions { options, format })
}

/// Trims `raw`, adds a scheme if missing and checks the host.
fn normalize_url(raw: &OptionValue) -> Result<String, ValidationError> {
    let Some(text) = raw.as_text() else {
        return Err(ValidationError::InvalidUrl(raw.to_string()));
    };

    let trimmed = text.trim();
    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    if has_dotted_host(&candidate) {
        Ok(candidate)
    } else {
        Err(ValidationError::InvalidUrl(candidate))
    }
}

/// The format becomes a path segment of the render URL.
fn is_format_name(format: &str) -> bool {
    !format.is_empty()
        && format
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn has_dotted_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.contains('.')))
        .unwrap_or(false)
}
