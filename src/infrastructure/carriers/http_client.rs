//! # HTTP Client Utilities
//!
//! Shared HTTP client for remote carrier adapters.
//!
//! Wraps `reqwest` with a per-request timeout, default (authentication)
//! headers, JSON bodies, and mapping of transport and status failures onto
//! [`CarrierError`].
//!
//! Request paths are given as segments. Each segment is percent-encoded on
//! its own, so caller-supplied values such as tracking numbers can never
//! add path components, a query, or a fragment.

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default per-request timeout for carrier APIs.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// HTTP client wrapper for carrier adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    base: Url,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client that sends `headers` with every request.
    ///
    /// Path segments passed to the request methods are appended to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if `base_url` is not an absolute
    /// URL or the client cannot be created.
    pub fn with_headers(
        base_url: impl Into<String>,
        timeout_ms: u64,
        default_headers: HeaderMap,
    ) -> CarrierResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| {
            CarrierError::internal_error(format!("Invalid base URL {base_url}: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(CarrierError::internal_error(format!(
                "Base URL {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                CarrierError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            base,
            timeout_ms,
        })
    }

    /// Creates a client authenticating with a single header.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Authentication` if the credential is not a
    /// valid header value, or `CarrierError::InternalError` if the client
    /// cannot be created.
    pub fn with_auth_header(
        base_url: impl Into<String>,
        timeout_ms: u64,
        name: &'static str,
        credential: &str,
    ) -> CarrierResult<Self> {
        let mut value = HeaderValue::from_str(credential).map_err(|_| {
            CarrierError::authentication("credential contains invalid header characters")
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(name), value);
        Self::with_headers(base_url, timeout_ms, headers)
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// Empty, `.` and `..` segments are rejected since they would address a
    /// different resource.
    fn url(&self, segments: &[&str]) -> CarrierResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(CarrierError::invalid_request(format!(
                "invalid path segment {bad:?}"
            )));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CarrierError::internal_error("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InvalidRequest` for an unusable path segment,
    /// a transport error, or a status-mapped error.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> CarrierResult<T> {
        let response = self.send(self.client.get(self.url(segments)?)).await?;
        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        params: &P,
    ) -> CarrierResult<T> {
        let response = self
            .send(self.client.get(self.url(segments)?).query(params))
            .await?;
        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> CarrierResult<T> {
        let response = self
            .send(self.client.post(self.url(segments)?).json(body))
            .await?;
        self.handle_response(response).await
    }

    /// Makes a POST request and only checks for a 2xx status.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn post_empty(&self, segments: &[&str]) -> CarrierResult<()> {
        let response = self.send(self.client.post(self.url(segments)?)).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    async fn send(&self, request: RequestBuilder) -> CarrierResult<Response> {
        request.send().await.map_err(|e| self.map_reqwest_error(e))
    }

    /// Checks the status and deserializes the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> CarrierResult<T> {
        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| {
                CarrierError::protocol_error(format!("Failed to parse response: {}", e))
            })
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    async fn error_from_response(&self, response: Response) -> CarrierError {
        let status = response.status();
        let retry_after_ms = retry_after_ms(response.headers());
        let error_body = response.text().await.unwrap_or_default();
        self.map_status_error(status, &error_body, retry_after_ms)
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("Connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }

    fn map_status_error(
        &self,
        status: StatusCode,
        body: &str,
        retry_after_ms: Option<u64>,
    ) -> CarrierError {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                CarrierError::invalid_request(format!("Bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CarrierError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::NOT_FOUND => CarrierError::not_found(format!("Resource not found: {}", body)),
            StatusCode::TOO_MANY_REQUESTS => match retry_after_ms {
                Some(ms) => CarrierError::rate_limited_with_retry("Rate limit exceeded", ms),
                None => CarrierError::rate_limited("Rate limit exceeded"),
            },
            s if s.is_server_error() => {
                CarrierError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => CarrierError::protocol_error(format!("HTTP error ({}): {}", status, body)),
        }
    }
}

/// Reads a delay-seconds `Retry-After` header. HTTP-date values are ignored.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}
