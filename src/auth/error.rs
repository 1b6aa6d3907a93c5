//! Authentication error types for the Kazoo API SDK.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::auth::AuthError;
//!
//! let error = AuthError::ExchangeRejected {
//!     status: 401,
//!     message: "invalid credentials".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while exchanging credentials for an auth token.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Kazoo refused the credentials.
    #[error("Credential exchange failed with status {status}: {message}")]
    ExchangeRejected {
        /// The HTTP status code of the exchange response.
        status: u16,
        /// The error message reported by Kazoo.
        message: String,
    },

    /// The exchange succeeded but the response carried no `auth_token`.
    #[error("Credential exchange response (status {status}) did not include an auth_token.")]
    MissingToken {
        /// The HTTP status code of the exchange response.
        status: u16,
    },

    /// The exchange request could not be sent or its response not read.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
