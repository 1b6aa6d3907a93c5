//! HTTP response types for the Kazoo API SDK.
//!
//! Kazoo wraps every JSON response in an envelope:
//!
//! ```json
//! {
//!   "auth_token": "abc437d000007d0454cc984f6f09daf3",
//!   "data": { "id": "c4f64412ad0057222c0009a3e7da011", "name": "test3" },
//!   "request_id": "ea6441422fb85000ad21db4f1e2326c1",
//!   "revision": "3-c16dd0a629fe1da0000e1e7b3e5fb35a",
//!   "status": "success"
//! }
//! ```
//!
//! [`HttpResponse`] keeps the decoded envelope with its object key order
//! intact and offers accessors for the envelope fields.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response from the Kazoo API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body, `Value::Null` when the body is not JSON.
    pub body: Value,
    /// The undecoded response body.
    pub raw_body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: Value,
        raw_body: impl Into<String>,
    ) -> Self {
        Self {
            code,
            headers,
            body,
            raw_body: raw_body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the response signals a rejected or expired auth token.
    ///
    /// Kazoo answers with HTTP 401, and older releases additionally (or
    /// only) report `"error": "401"` inside the envelope.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        self.code == 401
            || self
                .body
                .get("error")
                .and_then(value_as_text)
                .is_some_and(|error| error == "401")
    }

    /// Returns the envelope `status` field (`"success"` or `"error"`).
    #[must_use]
    pub fn envelope_status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }

    /// Returns `true` if the envelope reports `"status": "error"`.
    #[must_use]
    pub fn is_error_envelope(&self) -> bool {
        self.envelope_status() == Some("error")
    }

    /// Returns the envelope `data` field, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Returns the envelope `auth_token` field, if present.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.body.get("auth_token").and_then(Value::as_str)
    }

    /// Returns the request id from the `X-Request-Id` header or the envelope.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
            .or_else(|| self.body.get("request_id").and_then(Value::as_str))
    }

    /// Returns a human-readable error message for a failed response.
    ///
    /// Prefers the envelope `message`, then `error`, then the raw body.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.body
            .get("message")
            .and_then(value_as_text)
            .or_else(|| self.body.get("error").and_then(value_as_text))
            .unwrap_or_else(|| self.raw_body.clone())
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
