//! HTTP client types for Kazoo API communication.
//!
//! This module provides the HTTP layer for making authenticated requests to
//! the Kazoo API and the [`KazooClient`] facade built on it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A decoded response envelope
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestBody`] and [`FileAttachment`]: JSON, raw and multipart payloads
//! - [`kazoo::KazooClient`]: The client facade
//! - [`kazoo::ClientError`]: Error type of the facade
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/accounts/acc1/devices")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(&request, Some("auth-token")).await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpClient`] never retries. [`KazooClient`] retries a request exactly
//! once, after re-authenticating, when Kazoo rejects the auth token. Every
//! other failure is returned to the caller unchanged.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod kazoo;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, AUTH_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{
    FileAttachment, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, JSON_CONTENT_TYPE,
};
pub use http_response::HttpResponse;

// Re-export client facade types at the clients module level
pub use kazoo::{ClientError, KazooClient, ManualResponse};
