//! The render client and its request builders.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use tracing::{debug, trace, warn};

use super::ClientError;
use crate::config::{ClientSettings, ConfigError, defaults, field, hint};
use crate::endpoint;
use crate::options::{self, ProcessedOptions, RenderOptions, ValidationError};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};

/// Client for the Urlbox render API.
///
/// Holds the resolved [`ClientSettings`] and an [`HttpClient`]. Nothing in
/// it changes after construction, so one client can serve many concurrent
/// calls.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```
/// use urlbox::client::Client;
/// use urlbox::config::ClientSettings;
/// use urlbox::options::RenderOptions;
///
/// let client = Client::from_settings(ClientSettings::new("KEY").unwrap());
/// let url = client
///     .generate_url(RenderOptions::new().with("url", "https://www.example.com"))
///     .unwrap();
///
/// assert_eq!(
///     url,
///     "https://api.urlbox.io/v1/KEY/png?url=https%3A%2F%2Fwww.example.com&format=png"
/// );
/// ```
#[derive(Debug)]
pub struct Client<H = ReqwestClient> {
    settings: ClientSettings,
    http: H,
}

impl Client {
    /// Creates a client that sends requests with [`ReqwestClient`].
    #[must_use]
    pub fn from_settings(settings: ClientSettings) -> Self {
        Self::with_http_client(settings, ReqwestClient::new())
    }
}

impl<H> Client<H> {
    /// Creates a client with a custom HTTP client.
    #[must_use]
    pub const fn with_http_client(settings: ClientSettings, http: H) -> Self {
        Self { settings, http }
    }

    /// The settings this client was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Builds the render URL for `options`.
    ///
    /// The URL carries a signing token when an API secret is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options name neither `url` nor
    /// `html`, or if `url` is not a valid URL.
    pub fn generate_url(&self, options: RenderOptions) -> Result<String, ValidationError> {
        let processed = options::process(options)?;
        Ok(self.render_url(&processed))
    }

    fn render_url(&self, processed: &ProcessedOptions) -> String {
        endpoint::build_url(
            self.settings.base_url(),
            self.settings.api_key(),
            self.settings.api_secret(),
            &processed.query_string(),
            processed.format(),
        )
    }

    fn render_request(
        &self,
        method: &http::Method,
        options: RenderOptions,
    ) -> Result<HttpRequest, ClientError> {
        let url = parse_url(&self.generate_url(options)?)?;
        debug!(%method, base_url = self.settings.base_url(), "Sending render request");
        trace!(url = url.as_str(), "Render URL");

        Ok(HttpRequest::new(method.clone(), url).with_timeout(defaults::request_timeout()))
    }

    fn post_request(&self, options: RenderOptions) -> Result<HttpRequest, ClientError> {
        let secret = self
            .settings
            .api_secret()
            .ok_or_else(|| ConfigError::missing(field::API_SECRET, hint::API_SECRET_FOR_POST))?;

        if !options.contains_key("webhook_url") {
            warn!(
                "webhook_url not supplied, you will need to poll the statusUrl in order to get your result"
            );
        }

        let processed = options::process(options)?;
        let body = serde_json::to_vec(processed.options())?;

        let endpoint = endpoint::render_endpoint(self.settings.base_url());
        let url = parse_url(&endpoint)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {secret}"))
            .map_err(|e| ConfigError::invalid(field::API_SECRET, e.to_string()))?;

        debug!(url = url.as_str(), bytes = body.len(), "Sending render POST");

        Ok(HttpRequest::post(url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(AUTHORIZATION, bearer)
            .with_body(body)
            .with_timeout(defaults::post_timeout()))
    }
}

impl<H: HttpClient> Client<H> {
    /// Renders synchronously and returns the rendered file.
    ///
    /// Redirects are followed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for bad options and
    /// [`ClientError::Http`] if the request fails in transit.
    pub async fn get(&self, options: RenderOptions) -> Result<HttpResponse, ClientError> {
        let request = self
            .render_request(&http::Method::GET, options)?
            .following_redirects();
        self.send(request).await
    }

    /// Sends a HEAD request for the render URL.
    ///
    /// Redirects are followed.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get`].
    pub async fn head(&self, options: RenderOptions) -> Result<HttpResponse, ClientError> {
        let request = self
            .render_request(&http::Method::HEAD, options)?
            .following_redirects();
        self.send(request).await
    }

    /// Deletes a cached render.
    ///
    /// Redirects are not followed.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get`].
    pub async fn delete(&self, options: RenderOptions) -> Result<HttpResponse, ClientError> {
        let request = self.render_request(&http::Method::DELETE, options)?;
        self.send(request).await
    }

    /// Queues an asynchronous render.
    ///
    /// The options are sent as a JSON body to the render endpoint,
    /// authorised with the API secret. A warning is logged when no
    /// `webhook_url` is given, since the result then has to be polled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if no API secret is configured,
    /// otherwise the same errors as [`Client::get`].
    pub async fn post(&self, options: RenderOptions) -> Result<HttpResponse, ClientError> {
        let request = self.post_request(options)?;
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let method = request.method.clone();
        let response = self.http.request(request).await?;
        debug!(%method, status = %response.status, "Render API responded");
        Ok(response)
    }
}

fn parse_url(raw: &str) -> Result<url::Url, HttpError> {
    url::Url::parse(raw).map_err(|e| HttpError::InvalidUrl(format!("{raw}: {e}")))
}
