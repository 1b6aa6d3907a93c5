//! Path building infrastructure for REST resources.
//!
//! Kazoo resources are described by a single URL template whose last
//! placeholder identifies one object:
//!
//! ```text
//! /accounts/{account_id}/callflows/{callflow_id}
//! ```
//!
//! - The placeholders before the last one are the resource's required
//!   arguments (`account_id`)
//! - The last placeholder is the object argument (`callflow_id`)
//! - The collection path is the template cut before the last placeholder
//!   (`/accounts/{account_id}/callflows`)
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::{build_path, parse_placeholders};
//!
//! let template = "/accounts/{account_id}/callflows/{callflow_id}";
//! let params = parse_placeholders(template).unwrap();
//! assert_eq!(params, vec!["account_id", "callflow_id"]);
//!
//! let url = build_path(template, &[("account_id", "acc1"), ("callflow_id", "cf1")]);
//! assert_eq!(url, "/accounts/acc1/callflows/cf1");
//! ```

use std::fmt::Display;

use crate::clients::HttpMethod;
use crate::error::ConfigError;

/// Operations every REST resource can expose.
///
/// Each operation has a fixed HTTP method and URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List the collection (GET on the collection path).
    List,
    /// Fetch one object (GET on the object path).
    Detail,
    /// Create an object (PUT on the collection path).
    Create,
    /// Update an object (POST on the object path).
    Update,
    /// Delete an object (DELETE on the object path).
    Delete,
}

impl ResourceOperation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::List,
        Self::Detail,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Detail => HttpMethod::Get,
            Self::Create => HttpMethod::Put,
            Self::Update => HttpMethod::Post,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns `true` if the operation addresses one object rather than the collection.
    #[must_use]
    pub const fn targets_object(&self) -> bool {
        matches!(self, Self::Detail | Self::Update | Self::Delete)
    }

    /// Returns `true` if the operation sends a request body.
    #[must_use]
    pub const fn carries_data(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Returns the placeholder names of a URL template, in order.
///
/// # Errors
///
/// - [`ConfigError::MalformedTemplate`] if the template does not start with
///   `/`, or a placeholder is unterminated, nested, empty or contains
///   anything but ASCII letters, digits and `_`
/// - [`ConfigError::NoPathParameters`] if the template has no placeholder
pub fn parse_placeholders(template: &str) -> Result<Vec<String>, ConfigError> {
    let malformed = || ConfigError::MalformedTemplate {
        template: template.to_string(),
    };

    if !template.starts_with('/') {
        return Err(malformed());
    }

    let mut placeholders = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(malformed());
        }
        let after = &rest[open + 1..];
        let close = after.find(['{', '}']).ok_or_else(malformed)?;
        let name = &after[..close];
        if after[close..].starts_with('{') || !is_placeholder_name(name) {
            return Err(malformed());
        }
        placeholders.push(name.to_string());
        rest = &after[close + 1..];
    }

    if placeholders.is_empty() {
        return Err(ConfigError::NoPathParameters {
            template: template.to_string(),
        });
    }

    Ok(placeholders)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the collection path of a template: everything before the `/`
/// that precedes its last placeholder.
///
/// Returns `None` if the template has no placeholder.
#[must_use]
pub fn collection_template(template: &str) -> Option<&str> {
    let last_open = template.rfind('{')?;
    Some(template[..last_open].strip_suffix('/').unwrap_or(&template[..last_open]))
}

/// Builds a path from a template by interpolating percent-encoded values.
///
/// Replaces each `{name}` placeholder with the matching value. Placeholders
/// without a value are left untouched.
///
/// # Example
///
/// ```rust
/// use kazoo_api::rest::build_path;
///
/// let url = build_path(
///     "/accounts/{account_id}/phone_numbers/{phone_number}",
///     &[("account_id", "acc1"), ("phone_number", "+14155550100")],
/// );
/// assert_eq!(url, "/accounts/acc1/phone_numbers/%2B14155550100");
/// ```
#[must_use]
pub fn build_path<V: Display>(template: &str, ids: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};
