//! # Kazoo API Rust SDK
//!
//! A Rust SDK for the REST API of the Kazoo telephony platform, mapping
//! accounts, devices, callflows, phone numbers, media, users and the rest of
//! the API onto methods of a single client.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`KazooConfig`] and [`KazooConfigBuilder`]
//! - Validated newtypes for credentials and the API base URL
//! - API key and username/password authentication, with automatic
//!   re-authentication when a token expires
//! - Resource methods generated from a declarative resource table
//! - An escape hatch, [`KazooClient::manual_request`], for anything else
//!
//! ## Quick Start
//!
//! ```rust
//! use kazoo_api::{KazooConfig, ApiKey, BaseUrl};
//!
//! // Create configuration using the builder pattern
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://kazoo.example.com:8443/v2").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use kazoo_api::{KazooClient, KazooConfig, ApiKey};
//! use serde_json::json;
//!
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .build()?;
//! let client = KazooClient::new(config)?;
//!
//! // Exchange the API key for an auth token
//! client.authenticate().await?;
//!
//! // GET /accounts/{account_id}/users
//! let users = client.get_users("acc1").await?;
//!
//! // PUT /accounts/{account_id}/callflows
//! let callflow = client
//!     .create_callflow("acc1", json!({"numbers": ["1000"], "flow": {"module": "voicemail"}}))
//!     .await?;
//!
//! // PUT /accounts/{account_id}/phone_numbers/{phone_number}/activate
//! client.activate_phone_number("acc1", "+14155550100", json!({})).await?;
//! ```
//!
//! Every method returns the decoded response envelope as a
//! [`serde_json::Value`] whose object key order matches the wire.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One retry, for one reason**: Only a rejected token is retried

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, AuthResponse, ClientSession, Credentials};
pub use config::{
    AccountName, ApiKey, BaseUrl, KazooConfig, KazooConfigBuilder, Password, Username,
    DEFAULT_BASE_URL,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    FileAttachment, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, RequestBody,
};

// Re-export the client facade
pub use clients::{ClientError, KazooClient, ManualResponse};
