//! Error types for the Kazoo API SDK.
//!
//! This module contains the configuration error type raised at setup time:
//! missing or conflicting credentials, malformed resource descriptors and
//! requests for operations a resource does not expose.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. A `ConfigError` is never recovered from by the SDK.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the SDK or describing resources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Kazoo API key.")]
    EmptyApiKey,

    /// A credential field was supplied as an empty string.
    #[error("Credential field '{field}' cannot be empty.")]
    EmptyCredentialField {
        /// The name of the empty field.
        field: &'static str,
    },

    /// Neither an API key nor a username/password/account name triple was given.
    #[error("You must pass either an api_key or a username, password and account_name.")]
    MissingCredentials,

    /// Only part of the username/password/account name triple was given.
    #[error("If using account name/password authentication then you must specify password, username and account_name. Missing: '{missing}'.")]
    IncompleteCredentials {
        /// The first missing field of the triple.
        missing: &'static str,
    },

    /// Both an API key and username/password fields were given.
    #[error("Pass either an api_key or username/password/account_name credentials, not both.")]
    ConflictingCredentials,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with an http or https scheme (e.g., 'https://api.example.com:8000/v2').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An environment variable could not be read.
    #[error("Environment variable '{name}' is not valid unicode.")]
    InvalidEnvVar {
        /// The name of the variable.
        name: &'static str,
    },

    /// A resource URL template contains no `{param}` placeholders.
    #[error("Rest resources need at least one argument: template '{template}' has no path parameters.")]
    NoPathParameters {
        /// The offending template.
        template: String,
    },

    /// A resource URL template contains an unterminated or empty placeholder.
    #[error("Malformed placeholder in resource template '{template}'.")]
    MalformedTemplate {
        /// The offending template.
        template: String,
    },

    /// An extra view was requested that the resource does not declare.
    #[error("Unknown extra view name '{view}' on resource '{resource}'.")]
    UnknownExtraView {
        /// The resource name.
        resource: String,
        /// The requested view path.
        view: String,
    },

    /// An operation was requested that the resource does not support.
    #[error("Resource '{resource}' does not support the '{operation}' operation.")]
    UnsupportedOperation {
        /// The resource name.
        resource: String,
        /// The requested operation.
        operation: &'static str,
    },

    /// The number of path arguments does not match the resource template.
    #[error("Resource '{resource}' expects {expected} path argument(s), got {got}.")]
    ArgumentCount {
        /// The resource name.
        resource: String,
        /// The number of arguments the operation needs.
        expected: usize,
        /// The number of arguments supplied.
        got: usize,
    },
}
