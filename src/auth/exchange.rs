//! Credential exchange against the Kazoo auth endpoints.
//!
//! Kazoo issues auth tokens from two endpoints:
//!
//! - `PUT /api_auth` with `{"data": {"api_key": ...}}`
//! - `PUT /user_auth` with `{"data": {"credentials": md5("user:password"), "account_name": ...}}`
//!
//! Both answer with an envelope whose top-level `auth_token` field holds the
//! token for later requests. Exchange requests never carry a token
//! themselves and are never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::auth::exchange_credentials;
//! use kazoo_api::clients::HttpClient;
//!
//! let http = HttpClient::new(&config)?;
//! let response = exchange_credentials(&http, config.credentials()).await?;
//! println!("Token: {}", response.auth_token);
//! ```

use md5::{Digest, Md5};
use serde_json::{json, Value};

use crate::auth::{AuthError, AuthResponse, Credentials};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, RequestBody};

/// Exchanges credentials for an auth token.
///
/// # Errors
///
/// - [`AuthError::ExchangeRejected`] if Kazoo answers with a non-2xx status
///   or an error envelope
/// - [`AuthError::MissingToken`] if the response carries no `auth_token`
/// - [`AuthError::Http`] if the request could not be sent
pub async fn exchange_credentials(
    http: &HttpClient,
    credentials: &Credentials,
) -> Result<AuthResponse, AuthError> {
    let request = HttpRequest::builder(HttpMethod::Put, credentials.auth_path())
        .body(RequestBody::envelope(exchange_payload(credentials)))
        .auth_required(false)
        .build()
        .map_err(HttpError::from)?;

    tracing::debug!(
        "Exchanging {} credentials at {}",
        credentials.kind(),
        credentials.auth_path()
    );

    let response = http.send(&request, None).await?;

    if !response.is_ok() || response.is_error_envelope() {
        return Err(AuthError::ExchangeRejected {
            status: response.code,
            message: response.error_message(),
        });
    }

    AuthResponse::from_envelope(&response.body).ok_or(AuthError::MissingToken {
        status: response.code,
    })
}

/// Builds the `data` member of the exchange request.
fn exchange_payload(credentials: &Credentials) -> Value {
    match credentials {
        Credentials::ApiKey(key) => json!({ "api_key": key.as_ref() }),
        Credentials::UsernamePassword {
            username,
            password,
            account_name,
        } => json!({
            "credentials": credentials_hash(username.as_ref(), password.as_ref()),
            "account_name": account_name.as_ref(),
        }),
    }
}

/// Returns the lowercase hex MD5 digest of `"username:password"`.
fn credentials_hash(username: &str, password: &str) -> String {
    let digest = Md5::digest(format!("{username}:{password}").as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountName, ApiKey, BaseUrl, KazooConfig, Password, Username};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_credentials() -> Credentials {
        Credentials::UsernamePassword {
            username: Username::new("alice").unwrap(),
            password: Password::new("secret").unwrap(),
            account_name: AccountName::new("acme").unwrap(),
        }
    }

    fn http_client(server: &MockServer, credentials: Credentials) -> HttpClient {
        let config = KazooConfig::builder()
            .credentials(credentials)
            .base_url(BaseUrl::new(server.uri()).unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_credentials_hash_is_md5_of_user_and_password() {
        assert_eq!(
            credentials_hash("alice", "secret"),
            "6f622058968bb90757e6c6ed79e5df81"
        );
        assert_eq!(credentials_hash("", ""), "853ae90f0351324bd73ea615e6487517");
    }

    #[test]
    fn test_api_key_payload() {
        let payload = exchange_payload(&Credentials::ApiKey(ApiKey::new("key-1").unwrap()));
        assert_eq!(payload, json!({"api_key": "key-1"}));
    }

    #[test]
    fn test_user_payload_hashes_credentials() {
        let payload = exchange_payload(&user_credentials());
        assert_eq!(payload["account_name"], "acme");
        assert_eq!(payload["credentials"], credentials_hash("alice", "secret"));
        assert!(!payload.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_api_key_exchange_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api_auth"))
            .and(body_json(json!({"data": {"api_key": "key-1"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "auth_token": "tok-1",
                "data": {"account_id": "acc1"},
                "status": "success"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Credentials::ApiKey(ApiKey::new("key-1").unwrap());
        let http = http_client(&server, credentials.clone());

        let response = exchange_credentials(&http, &credentials).await.unwrap();
        assert_eq!(response.auth_token, "tok-1");
        assert_eq!(response.account_id.as_deref(), Some("acc1"));
    }

    #[tokio::test]
    async fn test_user_exchange_posts_to_user_auth() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user_auth"))
            .and(body_json(json!({"data": {
                "credentials": credentials_hash("alice", "secret"),
                "account_name": "acme"
            }})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "auth_token": "tok-2",
                "data": {"account_id": "acc1", "owner_id": "user1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = http_client(&server, user_credentials());
        let response = exchange_credentials(&http, &user_credentials())
            .await
            .unwrap();

        assert_eq!(response.auth_token, "tok-2");
        assert_eq!(response.owner_id.as_deref(), Some("user1"));
    }

    #[tokio::test]
    async fn test_rejected_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api_auth"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "401",
                "message": "invalid_credentials",
                "status": "error"
            })))
            .mount(&server)
            .await;

        let credentials = Credentials::ApiKey(ApiKey::new("bad").unwrap());
        let http = http_client(&server, credentials.clone());

        let result = exchange_credentials(&http, &credentials).await;
        assert!(matches!(
            result,
            Err(AuthError::ExchangeRejected { status: 401, message }) if message == "invalid_credentials"
        ));
    }

    #[tokio::test]
    async fn test_exchange_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api_auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&server)
            .await;

        let credentials = Credentials::ApiKey(ApiKey::new("key").unwrap());
        let http = http_client(&server, credentials.clone());

        let result = exchange_credentials(&http, &credentials).await;
        assert!(matches!(result, Err(AuthError::MissingToken { status: 200 })));
    }
}
