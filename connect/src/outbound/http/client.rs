//! Reqwest-backed client for the Connect REST API.
//!
//! This adapter owns transport details only: URL construction, bearer
//! authentication, timeout, error normalisation and JSON decoding.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, debug_span};

use crate::config::{ConfigError, ConnectSettings};
use crate::domain::Session;
use crate::domain::ports::ApiError;

/// Failure to build a [`ConnectHttpClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    /// The configured settings are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error body shape returned by the Connect API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client shared by every slice.
///
/// Holds no credentials: each call receives the caller's [`Session`].
#[derive(Debug, Clone)]
pub struct ConnectHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ConnectHttpClient {
    /// Build a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Build a client from the configured API base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::Config`] when the base URL does not parse
    /// and [`ClientBuildError::Http`] when reqwest rejects the client.
    ///
    /// # Examples
    ///
    /// ```
    /// use connect::config::ConnectSettings;
    /// use connect::outbound::http::ConnectHttpClient;
    ///
    /// let client = ConnectHttpClient::from_settings(&ConnectSettings::local())
    ///     .expect("client builds");
    /// assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
    /// ```
    pub fn from_settings(settings: &ConnectSettings) -> Result<Self, ClientBuildError> {
        let base_url = settings.api_base_url()?;
        let timeout = settings.request_timeout();
        debug!(%base_url, timeout_secs = timeout.as_secs(), "building Connect API client");
        Ok(Self::new(base_url, timeout)?)
    }

    /// Root URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(super) async fn get_json<T>(&self, session: &Session, path: &[&str]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute(Method::GET, path, session, |request| request)
            .await
    }

    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        session: &Session,
        path: &[&str],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(method, path, session, |request| request.json(body))
            .await
    }

    async fn execute<T>(
        &self,
        method: Method,
        path: &[&str],
        session: &Session,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base_url, path)?;
        let span = debug_span!(
            "connect_api_request",
            method = %method,
            path = url.path(),
            token = %session.token().fingerprint(),
        );
        async move {
            let request = self
                .client
                .request(method, url)
                .bearer_auth(session.token().expose())
                .header(ACCEPT, "application/json");
            let response = build(request)
                .send()
                .await
                .map_err(map_transport_error)?;

            let status = response.status();
            let body = response.bytes().await.map_err(map_transport_error)?;
            if !status.is_success() {
                debug!(status = status.as_u16(), "request failed");
                return Err(map_status_error(status, body.as_ref()));
            }
            decode(body.as_ref())
        }
        .instrument(span)
        .await
    }
}

fn endpoint(base_url: &Url, path: &[&str]) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::internal(format!("base URL {base_url} cannot carry a path")))?
        .pop_if_empty()
        .extend(path);
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid response body: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    if status == StatusCode::UNAUTHORIZED {
        ApiError::unauthorized(message)
    } else {
        ApiError::server(status.as_u16(), message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network request helpers.

    use super::*;
    use rstest::rstest;

    fn base(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[rstest]
    #[case("http://localhost:5000", "http://localhost:5000/api/events/featured")]
    #[case("http://localhost:5000/", "http://localhost:5000/api/events/featured")]
    #[case("https://campus.example/connect/", "https://campus.example/connect/api/events/featured")]
    fn endpoint_appends_segments(#[case] raw_base: &str, #[case] expected: &str) {
        let url = endpoint(&base(raw_base), &["api", "events", "featured"]).expect("url builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn endpoint_escapes_identifiers() {
        let url = endpoint(&base("http://localhost:5000"), &["api", "events", "a/b"])
            .expect("url builds");
        assert_eq!(url.path(), "/api/events/a%2Fb");
    }

    #[rstest]
    fn cannot_be_a_base_urls_are_rejected() {
        let error = endpoint(&base("mailto:ops@example.test"), &["api"]).expect_err("no path");
        assert!(matches!(error, ApiError::Internal { .. }));
    }

    #[rstest]
    #[case::server_message(
        StatusCode::NOT_FOUND,
        br#"{"message":"Event not found"}"#.as_slice(),
        ApiError::server(404_u16, "Event not found")
    )]
    #[case::unauthorized(
        StatusCode::UNAUTHORIZED,
        br#"{"message":"Not authorized, token failed"}"#.as_slice(),
        ApiError::unauthorized("Not authorized, token failed")
    )]
    #[case::html_body(
        StatusCode::BAD_GATEWAY,
        b"<html>bad gateway</html>".as_slice(),
        ApiError::server(502_u16, "Request failed with status code 502")
    )]
    #[case::json_without_message(
        StatusCode::INTERNAL_SERVER_ERROR,
        br#"{"error":"boom"}"#.as_slice(),
        ApiError::server(500_u16, "Request failed with status code 500")
    )]
    #[case::blank_message(
        StatusCode::UNAUTHORIZED,
        br#"{"message":"  "}"#.as_slice(),
        ApiError::unauthorized("Request failed with status code 401")
    )]
    fn normalises_error_responses(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: ApiError,
    ) {
        assert_eq!(map_status_error(status, body), expected);
    }

    #[rstest]
    fn client_is_built_from_settings() {
        let mut settings = ConnectSettings::local();
        settings.api_base_url = "https://campus.example/connect/".to_owned();
        settings.request_timeout_secs = 5;

        let client = ConnectHttpClient::from_settings(&settings).expect("client builds");

        assert_eq!(client.base_url().as_str(), "https://campus.example/connect/");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn invalid_configured_base_url_is_reported() {
        let mut settings = ConnectSettings::local();
        settings.api_base_url = "not a url".to_owned();

        let error = ConnectHttpClient::from_settings(&settings).expect_err("url rejected");

        assert!(matches!(
            error,
            ClientBuildError::Config(ConfigError::InvalidApiBaseUrl { .. })
        ));
    }

    #[rstest]
    fn undecodable_success_body_is_a_decode_error() {
        let error = decode::<Vec<u32>>(b"not json").expect_err("decode fails");
        assert!(matches!(error, ApiError::Decode { .. }));
    }
}
