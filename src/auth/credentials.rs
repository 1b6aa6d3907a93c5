//! Credentials used to obtain a Kazoo auth token.

use crate::config::{AccountName, ApiKey, Password, Username};

/// The credentials a [`KazooClient`](crate::KazooClient) authenticates with.
///
/// Kazoo accepts either an account API key or a user's name and password
/// together with the name of the account they belong to. Exactly one of the
/// two is held by a client; the choice is made once, when the
/// [`KazooConfig`](crate::KazooConfig) is built.
///
/// # Example
///
/// ```rust
/// use kazoo_api::{ApiKey, Credentials};
///
/// let credentials = Credentials::ApiKey(ApiKey::new("my-api-key").unwrap());
/// assert_eq!(credentials.auth_path(), "/api_auth");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Authenticate with an account API key (`PUT /api_auth`).
    ApiKey(ApiKey),
    /// Authenticate as a user (`PUT /user_auth`).
    UsernamePassword {
        /// The user name.
        username: Username,
        /// The user's password.
        password: Password,
        /// The name of the account the user belongs to.
        account_name: AccountName,
    },
}

impl Credentials {
    /// Returns the path of the credential exchange endpoint.
    #[must_use]
    pub const fn auth_path(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "/api_auth",
            Self::UsernamePassword { .. } => "/user_auth",
        }
    }

    /// Returns the short name of this credential kind, used in log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::UsernamePassword { .. } => "username_password",
        }
    }
}
