//! Results of [`KazooClient::manual_request`](crate::KazooClient::manual_request).

use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpResponse};

/// The outcome of a manual request.
///
/// Success is decided by the HTTP status class alone: any 2xx response is a
/// [`ManualResponse::Success`] carrying the envelope's `data` member, every
/// other status is a [`ManualResponse::Failure`] carrying the whole response.
///
/// # Example
///
/// ```rust,ignore
/// use kazoo_api::ManualResponse;
///
/// match client.list_apps("acc1").await? {
///     ManualResponse::Success(apps) => println!("Apps: {apps}"),
///     ManualResponse::Failure(response) => println!("Failed ({}): {}", response.code, response.raw_body),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum ManualResponse {
    /// A 2xx response; holds the envelope `data` member, `Value::Null` when absent.
    Success(Value),
    /// A non-2xx response.
    Failure(HttpResponse),
}

impl ManualResponse {
    /// Classifies a response by its status code.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if a 2xx response has a non-empty body
    /// that is not valid JSON.
    pub fn from_response(response: HttpResponse) -> Result<Self, HttpError> {
        if !response.is_ok() {
            return Ok(Self::Failure(response));
        }

        if response.body.is_null() && !response.raw_body.trim().is_empty() {
            let message = serde_json::from_str::<Value>(&response.raw_body)
                .err()
                .map_or_else(|| "expected a JSON document".to_string(), |e| e.to_string());
            return Err(HttpError::Decode {
                code: response.code,
                message,
            });
        }

        match response.data() {
            Some(data) => Ok(Self::Success(data.clone())),
            None => {
                if !response.body.is_null() {
                    tracing::warn!(
                        "Kazoo response with status {} has no data member",
                        response.code
                    );
                }
                Ok(Self::Success(Value::Null))
            }
        }
    }

    /// Returns `true` for a 2xx response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the `data` member of a successful response.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Unauthorized`] or [`HttpError::Response`] for a
    /// failed response.
    pub fn into_result(self) -> Result<Value, HttpError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(response) => {
                let response = HttpClient::classify(response)?;
                Ok(response.data().cloned().unwrap_or(Value::Null))
            }
        }
    }
}
