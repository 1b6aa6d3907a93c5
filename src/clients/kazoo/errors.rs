//! Error type of the Kazoo client facade.
//!
//! Every [`KazooClient`](crate::KazooClient) method returns
//! `Result<_, ClientError>`:
//!
//! - [`ClientError::Config`]: A resource or call was misconfigured. Never retried.
//! - [`ClientError::Auth`]: The credential exchange failed, including the
//!   re-authentication forced by a rejected token
//! - [`ClientError::Http`]: The request itself failed. A token that is still
//!   rejected after the single retry surfaces as
//!   [`HttpError::Unauthorized`]
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::{ClientError, clients::HttpError};
//!
//! match client.get_devices("acc1").await {
//!     Ok(envelope) => println!("Devices: {}", envelope["data"]),
//!     Err(ClientError::Auth(e)) => println!("Check your credentials: {e}"),
//!     Err(ClientError::Http(HttpError::Unauthorized(e))) => {
//!         println!("Token rejected twice: {e}");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use crate::auth::AuthError;
use crate::clients::{HttpError, InvalidHttpRequestError};
use crate::error::ConfigError;
use thiserror::Error;

/// Error type for Kazoo client operations.
///
/// # Example
///
/// ```rust
/// use kazoo_api::{ClientError, ConfigError};
///
/// let error: ClientError = ConfigError::MissingCredentials.into();
/// assert!(error.to_string().contains("api_key"));
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    /// A configuration error: bad credentials setup, descriptor or arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The credential exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ClientError {
    /// Returns `true` if the error is a rejected token or a failed credential exchange.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        match self {
            Self::Auth(_) => true,
            Self::Http(e) => e.is_auth_failure(),
            Self::Config(_) => false,
        }
    }
}

impl From<InvalidHttpRequestError> for ClientError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

// Verify ClientError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientError>();
};
