//! Session state for Kazoo API authentication.
//!
//! This module provides [`AuthResponse`], the decoded result of a credential
//! exchange, and [`ClientSession`], the token state a
//! [`KazooClient`](crate::KazooClient) keeps between requests.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// The decoded response of a successful credential exchange.
///
/// # Example
///
/// ```rust
/// use kazoo_api::auth::AuthResponse;
/// use serde_json::json;
///
/// let envelope = json!({
///     "auth_token": "tok-1",
///     "data": {"account_id": "acc1", "owner_id": "user1"},
///     "status": "success"
/// });
///
/// let response = AuthResponse::from_envelope(&envelope).unwrap();
/// assert_eq!(response.auth_token, "tok-1");
/// assert_eq!(response.account_id.as_deref(), Some("acc1"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AuthResponse {
    /// The token sent in the `X-Auth-Token` header of later requests.
    pub auth_token: String,
    /// The id of the account the credentials belong to.
    pub account_id: Option<String>,
    /// The id of the authenticated user, for username/password logins.
    pub owner_id: Option<String>,
    /// The full response envelope.
    pub envelope: Value,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    auth_token: Option<String>,
    data: Option<AuthData>,
}

#[derive(Debug, Deserialize)]
struct AuthData {
    account_id: Option<String>,
    owner_id: Option<String>,
}

impl AuthResponse {
    /// Decodes an exchange response envelope.
    ///
    /// Returns `None` if the envelope carries no non-empty `auth_token`.
    #[must_use]
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let decoded = AuthEnvelope::deserialize(envelope).ok()?;
        let auth_token = decoded.auth_token.filter(|token| !token.is_empty())?;
        let (account_id, owner_id) = decoded
            .data
            .map_or((None, None), |data| (data.account_id, data.owner_id));

        Some(Self {
            auth_token,
            account_id,
            owner_id,
            envelope: envelope.clone(),
        })
    }
}

/// Token state held by a client.
///
/// A session is either unauthenticated (no token) or authenticated with the
/// token of the most recent successful exchange. The token is only ever
/// replaced by [`ClientSession::store`] and removed by
/// [`ClientSession::clear`].
///
/// # Thread Safety
///
/// `ClientSession` is `Send + Sync`; the client guards it with an async mutex.
///
/// # Example
///
/// ```rust
/// use kazoo_api::auth::{AuthResponse, ClientSession};
/// use serde_json::json;
///
/// let mut session = ClientSession::new();
/// assert!(!session.is_authenticated());
///
/// let response = AuthResponse::from_envelope(&json!({"auth_token": "tok"})).unwrap();
/// session.store(response);
/// assert_eq!(session.auth_token(), Some("tok"));
///
/// session.clear();
/// assert!(session.auth_token().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientSession {
    auth: Option<AuthResponse>,
    authenticated_at: Option<DateTime<Utc>>,
}

impl ClientSession {
    /// Creates an unauthenticated session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auth: None,
            authenticated_at: None,
        }
    }

    /// Returns `true` if the session holds a token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the current auth token, if any.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.auth_token.as_str())
    }

    /// Returns the response of the exchange that produced the current token.
    #[must_use]
    pub const fn auth_response(&self) -> Option<&AuthResponse> {
        self.auth.as_ref()
    }

    /// Returns when the current token was obtained.
    #[must_use]
    pub const fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// Stores the result of a successful exchange.
    pub fn store(&mut self, response: AuthResponse) {
        self.auth = Some(response);
        self.authenticated_at = Some(Utc::now());
    }

    /// Drops the current token.
    pub fn clear(&mut self) {
        self.auth = None;
        self.authenticated_at = None;
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthResponse>();
    assert_send_sync::<ClientSession>();
};
