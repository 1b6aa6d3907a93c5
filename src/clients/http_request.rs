//! HTTP request types for the Kazoo API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder. An
//! `HttpRequest` is a fully resolved request specification: method, path
//! relative to the API base URL, query parameters, body, file attachments
//! and whether an auth token must be attached.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// MIME type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods supported by the Kazoo API.
///
/// Kazoo maps `PUT` to create and `POST` to update, the opposite of many
/// REST APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for updating resources.
    Post,
    /// HTTP PUT method for creating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods whose generated client methods take a data argument.
    #[must_use]
    pub const fn carries_data(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The body of an HTTP request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent as `application/json` text.
    Json(Value),
    /// Raw bytes with an explicit content type (media uploads, rate decks).
    Raw {
        /// The bytes to send.
        bytes: Vec<u8>,
        /// The `Content-Type` header value.
        content_type: String,
    },
}

impl RequestBody {
    /// Wraps `data` in the Kazoo request envelope, `{"data": data}`.
    #[must_use]
    pub fn envelope(data: Value) -> Self {
        let mut envelope = serde_json::Map::new();
        envelope.insert("data".to_string(), data);
        Self::Json(Value::Object(envelope))
    }

    /// Returns the content type this body is sent with.
    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => JSON_CONTENT_TYPE,
            Self::Raw { content_type, .. } => content_type,
        }
    }
}

/// A file sent as one part of a `multipart/form-data` request.
///
/// The contents are held in memory, so a request that is retried after
/// re-authentication sends exactly the same bytes again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAttachment {
    /// The multipart field name.
    pub field_name: String,
    /// The file name reported to the server.
    pub file_name: String,
    /// The file contents.
    pub bytes: Vec<u8>,
    /// The part's content type, if known.
    pub content_type: Option<String>,
}

impl FileAttachment {
    /// Creates an attachment whose field name equals its file name.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            field_name: file_name.clone(),
            file_name,
            bytes,
            content_type: None,
        }
    }

    /// Sets the part's content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// An HTTP request to be sent to the Kazoo API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::{HttpRequest, HttpMethod, RequestBody};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/accounts/acc1/callflows/cf1")
///     .body(RequestBody::envelope(json!({"numbers": ["1000"]})))
///     .build()
///     .unwrap();
///
/// assert!(request.auth_required);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the API base URL, starting with `/`.
    pub path: String,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Multipart file attachments.
    pub files: Vec<FileAttachment>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Whether the current auth token must be attached.
    pub auth_required: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` does not start with `/`
    /// - both a `body` and `files` are set
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::RelativePath {
                path: self.path.clone(),
            });
        }

        if self.body.is_some() && !self.files.is_empty() {
            return Err(InvalidHttpRequestError::BodyWithFiles);
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    files: Vec<FileAttachment>,
    extra_headers: Option<HashMap<String, String>>,
    auth_required: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            files: Vec::new(),
            extra_headers: None,
            auth_required: true,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a multipart file attachment.
    #[must_use]
    pub fn file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets whether the auth token must be attached (default `true`).
    #[must_use]
    pub const fn auth_required(mut self, required: bool) -> Self {
        self.auth_required = required;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            body: self.body,
            files: self.files,
            extra_headers: self.extra_headers,
            auth_required: self.auth_required,
        };
        request.verify()?;
        Ok(request)
    }
}
