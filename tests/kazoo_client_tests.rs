//! Integration tests for `KazooClient`.
//!
//! Tests cover:
//! - Lazy and idempotent authentication with both credential kinds
//! - The single re-authentication retry on a rejected token
//! - Failures that are never retried
//! - The manual request escape hatch and the helpers built on it
//! - Hand-written endpoints (number search, uploads, SUP commands)

use std::collections::HashMap;
use std::io::Write;

use kazoo_api::{
    AccountName, ApiKey, AuthError, BaseUrl, ClientError, ConfigError, FileAttachment, HttpError,
    HttpMethod, KazooClient, KazooConfig, ManualResponse, Password, RequestBody, Username,
};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn api_key_client(server: &MockServer) -> KazooClient {
    let config = KazooConfig::builder()
        .api_key(ApiKey::new("key-1").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    KazooClient::new(config).unwrap()
}

fn user_client(server: &MockServer) -> KazooClient {
    let config = KazooConfig::builder()
        .username(Username::new("alice").unwrap())
        .password(Password::new("secret").unwrap())
        .account_name(AccountName::new("acme").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    KazooClient::new(config).unwrap()
}

fn auth_envelope(token: &str) -> serde_json::Value {
    json!({
        "auth_token": token,
        "data": {"account_id": "acc1", "owner_id": "user1"},
        "status": "success"
    })
}

async fn mount_api_auth(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope(token)))
        .expect(times)
        .mount(server)
        .await;
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_authenticate_with_api_key_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .and(body_json(json!({"data": {"api_key": "key-1"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    assert!(!client.is_authenticated().await);

    let token = client.authenticate().await.unwrap();

    assert_eq!(token, "tok-1");
    assert!(client.is_authenticated().await);
    let session = client.session().await;
    let auth = session.auth_response().unwrap();
    assert_eq!(auth.account_id.as_deref(), Some("acc1"));
    assert_eq!(auth.owner_id.as_deref(), Some("user1"));
    assert!(session.authenticated_at().is_some());
}

#[tokio::test]
async fn test_authenticate_with_username_password_sends_md5_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user_auth"))
        .and(body_json(json!({
            "data": {
                "credentials": "6f622058968bb90757e6c6ed79e5df81",
                "account_name": "acme"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-user")))
        .expect(1)
        .mount(&server)
        .await;

    let client = user_client(&server);
    assert_eq!(client.authenticate().await.unwrap(), "tok-user");
}

#[tokio::test]
async fn test_authenticate_is_idempotent() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;

    let client = api_key_client(&server);
    let first = client.authenticate().await.unwrap();
    let second = client.authenticate().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_first_request_authenticates_lazily() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/users"))
        .and(header("X-Auth-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    client.get_users("acc1").await.unwrap();
    client.get_users("acc1").await.unwrap();
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"status": "error", "message": "invalid_credentials"})),
        )
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.get_callflows("acc1").await;

    match result {
        Err(ClientError::Auth(AuthError::ExchangeRejected { status, message })) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid_credentials");
        }
        other => panic!("expected a rejected exchange, got {other:?}"),
    }
    assert!(!client.is_authenticated().await);
}

#[test]
fn test_configuration_requires_complete_credentials() {
    let missing = KazooConfig::builder().build();
    assert!(matches!(missing, Err(ConfigError::MissingCredentials)));

    let partial = KazooConfig::builder()
        .username(Username::new("alice").unwrap())
        .build();
    assert!(matches!(
        partial,
        Err(ConfigError::IncompleteCredentials { missing: "password" })
    ));

    let conflicting = KazooConfig::builder()
        .api_key(ApiKey::new("key-1").unwrap())
        .account_name(AccountName::new("acme").unwrap())
        .build();
    assert!(matches!(conflicting, Err(ConfigError::ConflictingCredentials)));
}

// ============================================================================
// Retry on a rejected token
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-1")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/devices/dev1"))
        .and(header("X-Auth-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "error": "401",
            "message": "invalid credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/devices/dev1"))
        .and(header("X-Auth-Token", "tok-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "dev1"}, "status": "success"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let envelope = client.get_device("acc1", "dev1").await.unwrap();

    assert_eq!(envelope["data"]["id"], "dev1");
    assert_eq!(client.auth_token().await.as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn test_error_envelope_with_401_code_triggers_retry() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-2")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/groups"))
        .and(header("X-Auth-Token", "tok-1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"status": "error", "error": "401"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/groups"))
        .and(header("X-Auth-Token", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let envelope = client.get_groups("acc1").await.unwrap();

    assert_eq!(envelope["data"], json!([]));
}

#[tokio::test]
async fn test_second_rejection_is_returned_without_another_retry() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 2).await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/queues"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"status": "error", "message": "invalid credentials"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.get_queues("acc1").await;

    match result {
        Err(ClientError::Http(HttpError::Unauthorized(error))) => {
            assert_eq!(error.code, 401);
            assert_eq!(error.message, "invalid credentials");
        }
        other => panic!("expected an unauthorized error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_reauthentication_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-1")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"status": "error", "message": "invalid_credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"status": "error", "error": "401"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.get_users("acc1").await;

    match result {
        Err(ClientError::Auth(AuthError::ExchangeRejected { status, message })) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid_credentials");
        }
        other => panic!("expected a rejected re-authentication, got {other:?}"),
    }
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_server_errors_are_not_retried() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("DELETE"))
        .and(path("/accounts/acc1/menus/menu1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "datastore fault",
            "request_id": "req-9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.delete_menu("acc1", "menu1").await;

    match result {
        Err(ClientError::Http(HttpError::Response(error))) => {
            assert_eq!(error.code, 500);
            assert_eq!(error.message, "datastore fault");
            assert_eq!(error.request_id.as_deref(), Some("req-9"));
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.get_webhooks("acc1").await;

    assert!(matches!(
        result,
        Err(ClientError::Http(HttpError::Decode { code: 200, .. }))
    ));
}

// ============================================================================
// Manual requests
// ============================================================================

#[tokio::test]
async fn test_manual_request_returns_data_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/channels"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"uuid": "c1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let outcome = client
        .manual_request("/accounts/acc1/channels", HttpMethod::Get, None, None, Vec::new())
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.data(), Some(&json!([{"uuid": "c1"}])));
}

#[tokio::test]
async fn test_manual_request_returns_failed_response_without_retry() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 0).await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/channels"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"status": "error", "error": "401"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let outcome = client
        .manual_request("/accounts/acc1/channels", HttpMethod::Get, None, None, Vec::new())
        .await
        .unwrap();

    match outcome {
        ManualResponse::Failure(response) => assert_eq!(response.code, 401),
        ManualResponse::Success(data) => panic!("expected a failure, got {data}"),
    }
}

#[tokio::test]
async fn test_manual_request_uses_current_token_and_sends_body_verbatim() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc1/notifications"))
        .and(header("X-Auth-Token", "tok-1"))
        .and(body_json(json!({"enabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"enabled": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    client.authenticate().await.unwrap();
    let outcome = client
        .manual_request(
            "/accounts/acc1/notifications",
            HttpMethod::Post,
            None,
            Some(RequestBody::Json(json!({"enabled": true}))),
            Vec::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.data(), Some(&json!({"enabled": true})));
}

#[tokio::test]
async fn test_manual_multipart_request_uses_generated_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc1/phone_numbers/n1/docs/a.pdf"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let headers = HashMap::from([("content-type".to_string(), "multipart/form-data".to_string())]);
    let outcome = client
        .manual_request(
            "/accounts/acc1/phone_numbers/n1/docs/a.pdf",
            HttpMethod::Post,
            Some(headers),
            None,
            vec![FileAttachment::new("a.pdf", b"%PDF-1.4".to_vec())],
        )
        .await
        .unwrap();

    assert!(outcome.is_success());
    let requests = server.received_requests().await.unwrap();
    assert!(String::from_utf8_lossy(&requests[0].body).contains("%PDF-1.4"));
}

#[tokio::test]
async fn test_upload_ratedeck_posts_file_contents_as_csv() {
    let server = MockServer::start().await;
    let csv = "prefix,rate_cost\n1415,0.01\n";
    Mock::given(method("POST"))
        .and(path("/rates"))
        .and(header("Content-Type", "text/csv"))
        .and(body_string(csv))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "attempting"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let client = api_key_client(&server);
    let outcome = client.upload_ratedeck(file.path()).await.unwrap();

    assert_eq!(outcome.data(), Some(&json!("attempting")));
}

#[tokio::test]
async fn test_upload_ratedeck_reports_unreadable_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let client = api_key_client(&server);
    let result = client.upload_ratedeck(dir.path().join("missing.csv")).await;

    assert!(matches!(result, Err(ClientError::Http(HttpError::Io(_)))));
}

#[tokio::test]
async fn test_activate_apps_enables_every_listed_app() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/apps_store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "app1", "name": "voip"}, {"id": "app2", "name": "pbxs"}]
        })))
        .mount(&server)
        .await;
    for app in ["app1", "app2"] {
        Mock::given(method("PUT"))
            .and(path(format!("/accounts/acc1/apps_store/{app}")))
            .and(body_json(json!({"data": {"allowed_users": "all", "users": []}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": app}})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = api_key_client(&server);
    let outcomes = client.activate_apps("acc1").await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(ManualResponse::is_success));
}

#[tokio::test]
async fn test_activate_apps_fails_when_listing_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/apps_store"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "bad identifier"
        })))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let result = client.activate_apps("acc1").await;

    assert!(matches!(
        result,
        Err(ClientError::Http(HttpError::Response(ref error))) if error.code == 404
    ));
}

#[tokio::test]
async fn test_add_service_plans_sends_add_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc1/service_plans"))
        .and(body_json(json!({"data": {"add": ["plan1", "plan2"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let outcome = client
        .add_service_plans_to_account("acc1", &["plan1", "plan2"])
        .await
        .unwrap();

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_sup_calls_module_without_maintenance_suffix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sup/crossbar/migrate/acc1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let outcome = client
        .sup("crossbar_maintenance", "migrate", &["acc1"])
        .await
        .unwrap();

    assert_eq!(outcome.data(), Some(&json!("ok")));
}

// ============================================================================
// Hand-written endpoints
// ============================================================================

#[tokio::test]
async fn test_search_phone_numbers_sends_prefix_and_quantity() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/phone_numbers"))
        .and(query_param("prefix", "415"))
        .and(query_param("quantity", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": ["+14155550100"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let envelope = client
        .search_phone_numbers("415", kazoo_api::clients::kazoo::DEFAULT_SEARCH_QUANTITY)
        .await
        .unwrap();

    assert_eq!(envelope["data"][0], "+14155550100");
}

#[tokio::test]
async fn test_create_phone_number_encodes_number_and_sends_empty_data() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("PUT"))
        .and(path("/accounts/acc1/phone_numbers/%2B14155550100"))
        .and(body_json(json!({"data": {}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    client
        .create_phone_number("acc1", "+14155550100")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_media_file_posts_raw_bytes() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc1/media/med1/raw"))
        .and(header("Content-Type", "audio/x-wav"))
        .and(body_string("RIFF"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    client
        .upload_media_file("acc1", "med1", "audio/x-wav", b"RIFF".to_vec())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_retried_upload_resends_same_attachment() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api_auth"))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_envelope("tok-2")))
        .mount(&server)
        .await;
    let doc_path = "/accounts/acc1/phone_numbers/%2B14155550100/docs/loa.pdf";
    Mock::given(method("POST"))
        .and(path(doc_path))
        .and(header("X-Auth-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(doc_path))
        .and(header("X-Auth-Token", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let file = FileAttachment::new("loa.pdf", b"%PDF-1.4".to_vec())
        .with_content_type("application/pdf");
    client
        .upload_phone_number_file("acc1", "+14155550100", file)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let uploads: Vec<_> = requests
        .iter()
        .filter(|request| request.url.path() == doc_path)
        .collect();
    assert_eq!(uploads.len(), 2);
    for upload in uploads {
        let body = String::from_utf8_lossy(&upload.body);
        assert!(body.contains("%PDF-1.4"));
        assert!(body.contains("filename=\"loa.pdf\""));
    }
}

#[tokio::test]
async fn test_list_devices_by_owner_filters_on_owner() {
    let server = MockServer::start().await;
    mount_api_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc1/devices"))
        .and(query_param("filter_owner_id", "user1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    client.list_devices_by_owner("acc1", "user1").await.unwrap();
}
