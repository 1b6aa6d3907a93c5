//! HTTP client for Kazoo API communication.
//!
//! This module provides the [`HttpClient`] type, the transport used by
//! [`KazooClient`](crate::KazooClient) and by the credential exchange.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, KazooConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Kazoo auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// HTTP client for making requests to the Kazoo API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - Auth token injection
/// - JSON, raw and multipart bodies
/// - Response decoding and failure classification
///
/// It never retries; that decision belongs to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `http://api.2600hz.com:8000/v1`).
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &KazooConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Kazoo API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and returns the response whatever its status.
    ///
    /// The token, when given, is sent in the `X-Auth-Token` header. Headers
    /// from `request.extra_headers` override every default, including the
    /// content type and the token. Multipart requests are the exception: their
    /// `Content-Type` is always the one reqwest generates with the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation
    /// and [`HttpError::Network`] if the request could not be sent.
    pub async fn send(
        &self,
        request: &HttpRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);
        let headers = self.request_headers(request, token);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        match &request.body {
            Some(RequestBody::Json(value)) => {
                req_builder = req_builder.body(value.to_string());
            }
            Some(RequestBody::Raw { bytes, .. }) => {
                req_builder = req_builder.body(bytes.clone());
            }
            None => {}
        }

        if !request.files.is_empty() {
            let mut form = reqwest::multipart::Form::new();
            for file in &request.files {
                let mut part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type)?;
                }
                form = form.part(file.field_name.clone(), part);
            }
            req_builder = req_builder.multipart(form);
        }

        tracing::debug!(
            "Sending {} request to Kazoo API at {}",
            request.http_method,
            request.path
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let raw_body = res.text().await?;
        let body = serde_json::from_str(&raw_body).unwrap_or(Value::Null);

        Ok(HttpResponse::new(code, res_headers, body, raw_body))
    }

    /// Builds the header map sent with `request`.
    ///
    /// Multipart requests never carry a caller `Content-Type`; reqwest sets
    /// it together with the part boundary.
    fn request_headers(
        &self,
        request: &HttpRequest,
        token: Option<&str>,
    ) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if let Some(body) = &request.body {
            merge_header(&mut headers, "Content-Type", body.content_type());
        }
        if let Some(token) = token {
            merge_header(&mut headers, AUTH_TOKEN_HEADER, token);
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                merge_header(&mut headers, key, value);
            }
        }
        if !request.files.is_empty() {
            headers.retain(|key, _| !key.eq_ignore_ascii_case("content-type"));
        }
        headers
    }

    /// Sends a request and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - The token was rejected (`Unauthorized`)
    /// - A non-2xx response or error envelope was received (`Response`)
    /// - A successful response body is not valid JSON (`Decode`)
    pub async fn request(
        &self,
        request: &HttpRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let response = self.send(request, token).await?;
        Self::classify(response)
    }

    /// Turns a response into an error unless it is a successful JSON envelope.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub fn classify(response: HttpResponse) -> Result<HttpResponse, HttpError> {
        if response.is_auth_failure() {
            return Err(HttpError::Unauthorized(Self::response_error(&response)));
        }

        if !response.is_ok() || response.is_error_envelope() {
            return Err(HttpError::Response(Self::response_error(&response)));
        }

        if response.body.is_null() && !response.raw_body.trim().is_empty() {
            if let Err(e) = serde_json::from_str::<Value>(&response.raw_body) {
                return Err(HttpError::Decode {
                    code: response.code,
                    message: e.to_string(),
                });
            }
        }

        Ok(response)
    }

    fn response_error(response: &HttpResponse) -> HttpResponseError {
        HttpResponseError {
            code: response.code,
            message: response.error_message(),
            request_id: response.request_id().map(String::from),
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Inserts a header, replacing any existing header with the same name in any case.
fn merge_header(headers: &mut HashMap<String, String>, key: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
    headers.insert(key.to_string(), value.to_string());
}
