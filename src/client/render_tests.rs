//! Tests for the render `Client`.

use super::{Client, ClientError};
use crate::config::{ClientSettings, ConfigError};
use crate::options::{RenderOptions, ValidationError};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const EXAMPLE_QUERY: &str = "url=https%3A%2F%2Fwww.example.com&format=png";
/// HMAC-SHA1 of `EXAMPLE_QUERY` keyed with `SECRET`.
const EXAMPLE_TOKEN: &str = "587fe2a59206151f7e677e81a4bde656bcb5e0e9";

/// Mock HTTP client that records every request and answers with one
/// configurable response.
#[derive(Debug)]
struct MockClient {
    response: Mutex<Option<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn ok() -> Self {
        Self::with_status(http::StatusCode::OK)
    }

    fn with_status(status: http::StatusCode) -> Self {
        Self::new(Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            b"body".to_vec(),
        )))
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.captured_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("mock called more than once")
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

fn settings() -> ClientSettings {
    ClientSettings::new("KEY").unwrap()
}

fn signed_settings() -> ClientSettings {
    settings().with_api_secret("SECRET").unwrap()
}

fn example() -> RenderOptions {
    RenderOptions::new().with("url", "https://www.example.com")
}

fn client(settings: ClientSettings) -> Client<MockClient> {
    Client::with_http_client(settings, MockClient::ok())
}

/// Client sharing its mock so the test can inspect captured requests.
fn recording(
    settings: ClientSettings,
    mock: MockClient,
) -> (Client<Arc<MockClient>>, Arc<MockClient>) {
    let mock = Arc::new(mock);
    (Client::with_http_client(settings, Arc::clone(&mock)), mock)
}

mod generate_url {
    use super::*;

    #[test]
    fn unsigned_url_matches_expected_shape() {
        let url = client(settings()).generate_url(example()).unwrap();

        assert_eq!(
            url,
            "https://api.urlbox.io/v1/KEY/png?url=https%3A%2F%2Fwww.example.com&format=png"
        );
    }

    #[test]
    fn signed_url_embeds_sha1_token() {
        let url = client(signed_settings()).generate_url(example()).unwrap();

        assert_eq!(
            url,
            format!("https://api.urlbox.io/v1/KEY/{EXAMPLE_TOKEN}/png?{EXAMPLE_QUERY}")
        );
    }

    #[test]
    fn explicit_format_sets_path_segment() {
        let options = example().with("full_page", true).with("format", "pdf");

        let url = client(signed_settings()).generate_url(options).unwrap();

        assert_eq!(
            url,
            "https://api.urlbox.io/v1/KEY/35d5d21cccfa8e183e52af912e11419829930561/pdf\
             ?url=https%3A%2F%2Fwww.example.com&full_page=true&format=pdf"
        );
    }

    #[test]
    fn host_name_override_changes_base() {
        let settings = settings().with_api_host_name("api-eu.urlbox.io");

        let url = client(settings).generate_url(example()).unwrap();

        assert!(url.starts_with("https://api-eu.urlbox.io/KEY/png?"));
    }

    #[test]
    fn schemeless_url_gets_http_prefix() {
        let options = RenderOptions::new().with("url", "www.example.com");

        let url = client(settings()).generate_url(options).unwrap();

        assert!(url.ends_with("?url=http%3A%2F%2Fwww.example.com&format=png"));
    }

    #[test]
    fn html_only_is_accepted() {
        let options = RenderOptions::new().with("html", "<h1>Hi</h1>");

        let url = client(settings()).generate_url(options).unwrap();

        assert_eq!(
            url,
            "https://api.urlbox.io/v1/KEY/png?html=%3Ch1%3EHi%3C%2Fh1%3E&format=png"
        );
    }

    #[test]
    fn missing_target_is_rejected() {
        let result = client(settings()).generate_url(RenderOptions::new().with("width", 1280));

        assert_eq!(result, Err(ValidationError::MissingTarget));
    }

    #[test]
    fn invalid_url_is_rejected_with_normalized_value() {
        let result = client(settings()).generate_url(RenderOptions::new().with("url", "FOO"));

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Invalid URL: http://FOO");
    }
}

mod get_head_delete {
    use super::*;

    #[tokio::test]
    async fn get_follows_redirects_with_long_timeout() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());

        let response = client.get(example()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::OK);
        let req = mock.only_request();
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(
            req.url.as_str(),
            format!("https://api.urlbox.io/v1/KEY/{EXAMPLE_TOKEN}/png?{EXAMPLE_QUERY}")
        );
        assert!(req.follow_redirects);
        assert_eq!(req.timeout, Some(Duration::from_secs(100)));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn head_follows_redirects() {
        let (client, mock) = recording(settings(), MockClient::ok());

        client.head(example()).await.unwrap();

        let req = mock.only_request();
        assert_eq!(req.method, http::Method::HEAD);
        assert_eq!(
            req.url.as_str(),
            format!("https://api.urlbox.io/v1/KEY/png?{EXAMPLE_QUERY}")
        );
        assert!(req.follow_redirects);
        assert_eq!(req.timeout, Some(Duration::from_secs(100)));
    }

    #[tokio::test]
    async fn delete_does_not_follow_redirects() {
        let (client, mock) = recording(settings(), MockClient::ok());

        client.delete(example()).await.unwrap();

        let req = mock.only_request();
        assert_eq!(req.method, http::Method::DELETE);
        assert!(!req.follow_redirects);
        assert_eq!(req.timeout, Some(Duration::from_secs(100)));
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let client = Client::with_http_client(
            settings(),
            MockClient::with_status(http::StatusCode::UNAUTHORIZED),
        );

        let response = client.get(example()).await.unwrap();

        assert_eq!(response.status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, b"body");
    }

    #[tokio::test]
    async fn transport_error_is_passed_through() {
        let client = Client::with_http_client(settings(), MockClient::new(Err(HttpError::Timeout)));

        let result = client.get(example()).await;

        assert!(matches!(result, Err(ClientError::Http(HttpError::Timeout))));
    }

    #[tokio::test]
    async fn validation_error_sends_nothing() {
        let (client, mock) = recording(settings(), MockClient::ok());

        let result = client.get(RenderOptions::new()).await;

        assert!(matches!(
            result,
            Err(ClientError::Validation(ValidationError::MissingTarget))
        ));
        assert!(mock.captured_requests().is_empty());
    }
}

mod post {
    use super::*;

    fn webhook_options() -> RenderOptions {
        example().with("webhook_url", "https://example.com/webhooks/urlbox")
    }

    #[tokio::test]
    async fn sends_json_body_to_render_endpoint() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());

        client.post(webhook_options()).await.unwrap();

        let req = mock.only_request();
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url.as_str(), "https://api.urlbox.io/v1/render");
        assert_eq!(
            String::from_utf8(req.body.unwrap()).unwrap(),
            r#"{"url":"https://www.example.com","webhook_url":"https://example.com/webhooks/urlbox","format":"png"}"#
        );
    }

    #[tokio::test]
    async fn sends_auth_and_content_type_headers() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());

        client.post(webhook_options()).await.unwrap();

        let req = mock.only_request();
        assert_eq!(req.headers.get(http::header::AUTHORIZATION).unwrap(), "Bearer SECRET");
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn uses_short_timeout_without_redirects() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());

        client.post(webhook_options()).await.unwrap();

        let req = mock.only_request();
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
        assert!(!req.follow_redirects);
    }

    #[tokio::test]
    async fn body_keeps_typed_values_and_normalized_url() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());
        let options = RenderOptions::new()
            .with("url", "www.example.com")
            .with("full_page", true)
            .with("width", 1280)
            .with("header", vec!["a=1", "b=2"]);

        client.post(options).await.unwrap();

        let body = mock.only_request().body.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "http://www.example.com",
                "full_page": true,
                "width": 1280,
                "header": ["a=1", "b=2"],
                "format": "png"
            })
        );
    }

    #[tokio::test]
    async fn still_sends_without_webhook_url() {
        let (client, mock) = recording(signed_settings(), MockClient::ok());

        let result = client.post(example()).await;

        assert!(result.is_ok());
        assert_eq!(mock.captured_requests().len(), 1);
    }

    /// Log output captured from a `fmt` subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    async fn post_logs(options: RenderOptions) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (client, _mock) = recording(signed_settings(), MockClient::ok());
        client.post(options).await.unwrap();

        logs.text()
    }

    #[tokio::test]
    async fn warns_when_webhook_url_is_missing() {
        let logs = post_logs(example()).await;

        assert!(logs.contains("WARN"));
        assert!(logs.contains("webhook_url not supplied"));
    }

    #[tokio::test]
    async fn no_warning_when_webhook_url_is_given() {
        let logs = post_logs(webhook_options()).await;

        assert!(!logs.contains("webhook_url not supplied"));
    }

    #[tokio::test]
    async fn missing_secret_is_config_error() {
        let (client, mock) = recording(settings(), MockClient::ok());

        let result = client.post(webhook_options()).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::MissingRequired { field: "api_secret", .. })
        ));
        assert!(err.to_string().starts_with("Missing api_secret"));
        assert!(mock.captured_requests().is_empty());
    }

    #[tokio::test]
    async fn missing_secret_wins_over_missing_target() {
        let client = client(settings());

        let result = client.post(RenderOptions::new()).await;

        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}

#[test]
fn client_exposes_settings() {
    let client = client(signed_settings());

    assert_eq!(client.settings().api_key(), "KEY");
    assert_eq!(client.settings().api_secret(), Some("SECRET"));
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
    assert_send_sync::<Client<MockClient>>();
}
