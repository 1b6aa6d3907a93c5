//! Authentication types for the Kazoo API SDK.
//!
//! This module provides the credentials a client authenticates with, the
//! credential exchange against Kazoo's auth endpoints and the session state
//! that holds the resulting token.
//!
//! # Overview
//!
//! - [`Credentials`]: An API key, or a username/password/account name triple
//! - [`exchange_credentials`]: Trades credentials for an auth token
//! - [`AuthResponse`]: The decoded result of a successful exchange
//! - [`ClientSession`]: The token state kept by a client between requests
//! - [`AuthError`]: Failures of the credential exchange
//!
//! # Token Lifecycle
//!
//! A client starts unauthenticated. The first call to
//! [`KazooClient::authenticate`](crate::KazooClient::authenticate) performs
//! the exchange and stores the token; later calls reuse it. When Kazoo
//! rejects the token, the client clears it, exchanges the credentials again
//! and retries the failed request once.
//!
//! ```rust,ignore
//! use kazoo_api::{KazooClient, KazooConfig, ApiKey};
//!
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .build()?;
//! let client = KazooClient::new(config)?;
//!
//! let token = client.authenticate().await?;
//! ```

mod credentials;
mod error;
mod exchange;
mod session;

pub use credentials::Credentials;
pub use error::AuthError;
pub use exchange::exchange_credentials;
pub use session::{AuthResponse, ClientSession};
