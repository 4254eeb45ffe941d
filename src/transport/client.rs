//! Production HTTP client implementation using reqwest.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// Redirect handling is fixed per `reqwest::Client`, so this wrapper keeps
/// two of them: one that follows redirects (GET/HEAD) and one that never
/// does (DELETE/POST). The request's [`HttpRequest::follow_redirects`] flag
/// picks between them.
///
/// # Example
///
/// ```no_run
/// use urlbox::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.urlbox.io/v1/KEY/png?url=example.com")?;
/// let response = client.request(HttpRequest::get(url).following_redirects()).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    following: reqwest::Client,
    direct: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    ///
    /// Falls back to reqwest's default client (which follows redirects)
    /// if the non-redirecting client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let direct = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build non-redirecting HTTP client: {e}");
                reqwest::Client::new()
            });

        Self {
            following: reqwest::Client::new(),
            direct,
        }
    }

    /// Creates an HTTP client from existing reqwest clients.
    ///
    /// `following` serves requests that follow redirects, `direct` serves the
    /// rest. Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_clients(following: reqwest::Client, direct: reqwest::Client) -> Self {
        Self { following, direct }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let inner = if req.follow_redirects {
            &self.following
        } else {
            &self.direct
        };

        let mut builder = inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
