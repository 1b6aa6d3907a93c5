//! HTTP-specific error types for the Kazoo API SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, authentication failures and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: A failed response from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Only [`HttpError::Unauthorized`] is ever retried, and only once, by
//! [`KazooClient`](crate::KazooClient). Every other variant reaches the
//! caller unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::clients::HttpError;
//!
//! match client.get_account("acc1").await {
//!     Ok(envelope) => println!("Account: {}", envelope["data"]),
//!     Err(ClientError::Http(HttpError::Response(e))) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(other) => println!("Failed: {other}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a failed response.
///
/// A response fails when its status code is outside the 2xx range, or when
/// the Kazoo envelope reports `"status": "error"`.
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "bad identifier".to_string(),
///     request_id: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "Request failed with status 404: bad identifier");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request failed with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message reported by Kazoo, or the raw body.
    pub message: String,
    /// The request id reported by Kazoo (`request_id` envelope field or `X-Request-Id` header).
    pub request_id: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::RelativePath {
///     path: "accounts".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Request path 'accounts' must start with '/'.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is not rooted at the API base URL.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The offending path.
        path: String,
    },

    /// A request carried both a body and multipart files.
    #[error("Cannot send a body and file attachments in the same request.")]
    BodyWithFiles,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The auth token was missing, expired or rejected (HTTP 401).
    #[error("Authentication failed: {0}")]
    Unauthorized(HttpResponseError),

    /// An HTTP response error (non-2xx status code or error envelope).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The response body was not valid JSON.
    #[error("Malformed response body (status {code}): {message}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The decoder's error message.
        message: String,
    },

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if this error signals an authentication failure.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
