//! Configuration types for the Kazoo API SDK.
//!
//! This module provides the configuration used to construct a
//! [`KazooClient`](crate::KazooClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KazooConfig`]: The main configuration struct holding all SDK settings
//! - [`KazooConfigBuilder`]: A builder for constructing [`KazooConfig`] instances
//! - [`ApiKey`], [`Username`], [`Password`], [`AccountName`]: validated credential newtypes
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Credentials
//!
//! A configuration holds exactly one kind of [`Credentials`]: an API key, or
//! the complete username/password/account name triple. The builder rejects
//! anything else with a [`ConfigError`].
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::{KazooConfig, ApiKey, BaseUrl};
//!
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://kazoo.example.com:8443/v2").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccountName, ApiKey, BaseUrl, Password, Username};

use std::env;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// The API base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://api.2600hz.com:8000/v1";

/// Configuration for the Kazoo API SDK.
///
/// # Thread Safety
///
/// `KazooConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use kazoo_api::{KazooConfig, Username, Password, AccountName};
///
/// let config = KazooConfig::builder()
///     .username(Username::new("alice").unwrap())
///     .password(Password::new("secret").unwrap())
///     .account_name(AccountName::new("acme").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "http://api.2600hz.com:8000/v1");
/// ```
#[derive(Clone, Debug)]
pub struct KazooConfig {
    credentials: Credentials,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl KazooConfig {
    /// Creates a new builder for constructing a `KazooConfig`.
    #[must_use]
    pub fn builder() -> KazooConfigBuilder {
        KazooConfigBuilder::new()
    }

    /// Builds a configuration from environment variables.
    ///
    /// Reads `KAZOO_API_KEY`, or `KAZOO_USERNAME`, `KAZOO_PASSWORD` and
    /// `KAZOO_ACCOUNT_NAME`, plus an optional `KAZOO_BASE_URL`. Empty
    /// variables are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`KazooConfigBuilder::build`], or
    /// [`ConfigError::InvalidEnvVar`] if a variable is not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(key) = read_env("KAZOO_API_KEY")? {
            builder = builder.api_key(ApiKey::new(key)?);
        }
        if let Some(username) = read_env("KAZOO_USERNAME")? {
            builder = builder.username(Username::new(username)?);
        }
        if let Some(password) = read_env("KAZOO_PASSWORD")? {
            builder = builder.password(Password::new(password)?);
        }
        if let Some(account_name) = read_env("KAZOO_ACCOUNT_NAME")? {
            builder = builder.account_name(AccountName::new(account_name)?);
        }
        if let Some(base_url) = read_env("KAZOO_BASE_URL")? {
            builder = builder.base_url(BaseUrl::new(base_url)?);
        }

        builder.build()
    }

    /// Returns the credentials used for authentication.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify KazooConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KazooConfig>();
};

fn read_env(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvVar { name }),
    }
}

/// Builder for constructing [`KazooConfig`] instances.
///
/// Either `api_key` or all of `username`, `password` and `account_name`
/// must be set, never both.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (transport default)
#[derive(Debug, Default)]
pub struct KazooConfigBuilder {
    api_key: Option<ApiKey>,
    username: Option<Username>,
    password: Option<Password>,
    account_name: Option<AccountName>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl KazooConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the user name for username/password authentication.
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the password for username/password authentication.
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the account name for username/password authentication.
    #[must_use]
    pub fn account_name(mut self, account_name: AccountName) -> Self {
        self.account_name = Some(account_name);
        self
    }

    /// Sets all credentials at once.
    #[must_use]
    pub fn credentials(self, credentials: Credentials) -> Self {
        match credentials {
            Credentials::ApiKey(key) => self.api_key(key),
            Credentials::UsernamePassword {
                username,
                password,
                account_name,
            } => self
                .username(username)
                .password(password)
                .account_name(account_name),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every HTTP request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`KazooConfig`], resolving the credentials.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingCredentials`] if no credentials are set
    /// - [`ConfigError::IncompleteCredentials`] if only part of the
    ///   username/password/account name triple is set
    /// - [`ConfigError::ConflictingCredentials`] if an API key is combined
    ///   with any username/password field
    pub fn build(self) -> Result<KazooConfig, ConfigError> {
        let uses_login = self.username.is_some()
            || self.password.is_some()
            || self.account_name.is_some();

        let credentials = match (self.api_key, uses_login) {
            (Some(_), true) => return Err(ConfigError::ConflictingCredentials),
            (Some(key), false) => Credentials::ApiKey(key),
            (None, false) => return Err(ConfigError::MissingCredentials),
            (None, true) => Credentials::UsernamePassword {
                username: self
                    .username
                    .ok_or(ConfigError::IncompleteCredentials { missing: "username" })?,
                password: self
                    .password
                    .ok_or(ConfigError::IncompleteCredentials { missing: "password" })?,
                account_name: self.account_name.ok_or(ConfigError::IncompleteCredentials {
                    missing: "account_name",
                })?,
            },
        };

        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(KazooConfig {
            credentials,
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_key() -> ApiKey {
        ApiKey::new("key").unwrap()
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = KazooConfigBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_builder_accepts_api_key_only() {
        let config = KazooConfig::builder().api_key(api_key()).build().unwrap();
        assert!(matches!(config.credentials(), Credentials::ApiKey(_)));
    }

    #[test]
    fn test_builder_accepts_complete_triple() {
        let config = KazooConfig::builder()
            .username(Username::new("alice").unwrap())
            .password(Password::new("pw").unwrap())
            .account_name(AccountName::new("acme").unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            config.credentials(),
            Credentials::UsernamePassword { .. }
        ));
    }

    #[test]
    fn test_builder_rejects_partial_triple() {
        let result = KazooConfig::builder()
            .username(Username::new("alice").unwrap())
            .password(Password::new("pw").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::IncompleteCredentials {
                missing: "account_name"
            })
        ));
    }

    #[test]
    fn test_builder_rejects_api_key_with_partial_triple() {
        let result = KazooConfig::builder()
            .api_key(api_key())
            .password(Password::new("pw").unwrap())
            .build();

        assert!(matches!(result, Err(ConfigError::ConflictingCredentials)));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = KazooConfig::builder().api_key(api_key()).build().unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = KazooConfig::builder()
            .api_key(api_key())
            .base_url(BaseUrl::new("https://kazoo.local:8443/v2").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://kazoo.local:8443/v2");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_credentials_setter_round_trips_variant() {
        let credentials = Credentials::UsernamePassword {
            username: Username::new("alice").unwrap(),
            password: Password::new("pw").unwrap(),
            account_name: AccountName::new("acme").unwrap(),
        };
        let config = KazooConfig::builder()
            .credentials(credentials.clone())
            .build()
            .unwrap();

        assert_eq!(config.credentials(), &credentials);
    }

    // The only test touching KAZOO_* variables.
    #[test]
    fn test_from_env_reads_api_key_and_base_url() {
        for name in ["KAZOO_USERNAME", "KAZOO_PASSWORD", "KAZOO_ACCOUNT_NAME"] {
            env::remove_var(name);
        }
        env::set_var("KAZOO_API_KEY", "env-key");
        env::set_var("KAZOO_BASE_URL", "https://kazoo.env:8443/v2/");

        let config = KazooConfig::from_env();

        env::remove_var("KAZOO_API_KEY");
        env::remove_var("KAZOO_BASE_URL");

        let config = config.unwrap();
        assert!(matches!(config.credentials(), Credentials::ApiKey(key) if key.as_ref() == "env-key"));
        assert_eq!(config.base_url().as_ref(), "https://kazoo.env:8443/v2");
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KazooConfig>();
    }
}
