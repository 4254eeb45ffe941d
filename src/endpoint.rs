//! Render URL construction.
//!
//! A render URL has the shape
//! `{base}{api_key}/[{token}/]{format}?{query}` where the token is the
//! HMAC-SHA1 of the query string, present only when a secret is configured.

use crate::config::defaults;
use crate::signing;

/// Resolves the API base URL for an optional host name override.
///
/// A bare host name `h` becomes `https://h/`. A value that already carries
/// an `http://` or `https://` scheme is taken as the base URL itself. The
/// result always ends in `/`.
///
/// # Example
///
/// ```
/// use urlbox::endpoint::base_url;
///
/// assert_eq!(base_url(None), "https://api.urlbox.io/v1/");
/// assert_eq!(base_url(Some("api-eu.urlbox.io")), "https://api-eu.urlbox.io/");
/// ```
#[must_use]
pub fn base_url(host_name: Option<&str>) -> String {
    let Some(host) = host_name.map(str::trim) else {
        return defaults::BASE_API_URL.to_string();
    };

    let lower = host.to_ascii_lowercase();
    let mut url = if lower.starts_with("http://") || lower.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };

    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Builds a GET/HEAD/DELETE render URL.
///
/// When `api_secret` is present the URL carries the signing token computed
/// over `encoded_options`.
#[must_use]
pub fn build_url(
    base_url: &str,
    api_key: &str,
    api_secret: Option<&str>,
    encoded_options: &str,
    format: &str,
) -> String {
    match api_secret {
        Some(secret) => {
            let token = signing::sign(secret, encoded_options);
            format!("{base_url}{api_key}/{token}/{format}?{encoded_options}")
        }
        None => format!("{base_url}{api_key}/{format}?{encoded_options}"),
    }
}

/// URL that accepts render POST requests.
#[must_use]
pub fn render_endpoint(base_url: &str) -> String {
    format!("{base_url}{}", defaults::POST_ENDPOINT)
}
