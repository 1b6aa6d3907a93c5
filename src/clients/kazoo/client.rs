//! The Kazoo client facade.
//!
//! This module provides [`KazooClient`]: the credential exchange, the token
//! session, the shared execution pipeline used by every generated resource
//! method, the `manual_request` escape hatch and the hand-written
//! operations that do not fit the resource table.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::auth::{exchange_credentials, ClientSession};
use crate::clients::kazoo::{ClientError, ManualResponse};
use crate::clients::{
    FileAttachment, HttpClient, HttpError, HttpMethod, HttpRequest, RequestBody, JSON_CONTENT_TYPE,
};
use crate::config::KazooConfig;
use crate::rest::build_path;

/// Number of numbers [`KazooClient::search_phone_numbers`] asks for by default.
pub const DEFAULT_SEARCH_QUANTITY: u32 = 10;

/// The `allowed_users` value that enables an app for every user.
pub const ALL_USERS: &str = "all";

/// Client for the Kazoo REST API.
///
/// Besides the methods below, every entry of the resource table in
/// [`rest::resources`](crate::rest::resources) adds `get_<plural>`,
/// `get_<name>`, `create_<name>`, `update_<name>`, `delete_<name>` and its
/// extra-view methods. They all return the decoded response envelope, with
/// object key order preserved.
///
/// # Authentication
///
/// Requests carry the token of the last credential exchange. The exchange
/// happens on the first [`authenticate`](Self::authenticate) call, or
/// lazily before the first request. When Kazoo rejects the token, the
/// client re-authenticates and retries the request exactly once.
///
/// # Thread Safety
///
/// `KazooClient` is `Send + Sync`. Concurrent callers share one session;
/// concurrent first calls perform a single exchange.
///
/// # Example
///
/// ```rust,ignore
/// use kazoo_api::{KazooClient, KazooConfig, Username, Password, AccountName};
///
/// let config = KazooConfig::builder()
///     .username(Username::new("alice")?)
///     .password(Password::new("secret")?)
///     .account_name(AccountName::new("acme")?)
///     .build()?;
///
/// let client = KazooClient::new(config)?;
/// client.authenticate().await?;
///
/// let devices = client.get_devices("acc1").await?;
/// for device in devices["data"].as_array().into_iter().flatten() {
///     println!("{}", device["name"]);
/// }
/// ```
#[derive(Debug)]
pub struct KazooClient {
    config: KazooConfig,
    http_client: HttpClient,
    session: Mutex<ClientSession>,
}

// Verify KazooClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KazooClient>();
};

impl KazooClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be created.
    pub fn new(config: KazooConfig) -> Result<Self, ClientError> {
        let http_client = HttpClient::new(&config)?;

        Ok(Self {
            config,
            http_client,
            session: Mutex::new(ClientSession::new()),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &KazooConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns `true` if the client holds a token.
    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    /// Returns the current token, if any.
    pub async fn auth_token(&self) -> Option<String> {
        self.session.lock().await.auth_token().map(String::from)
    }

    /// Returns a snapshot of the session.
    pub async fn session(&self) -> ClientSession {
        self.session.lock().await.clone()
    }

    /// Authenticates unless a token is already held, and returns the token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if the credential exchange fails.
    pub async fn authenticate(&self) -> Result<String, ClientError> {
        let mut session = self.session.lock().await;
        self.authenticate_session(&mut session).await
    }

    async fn authenticate_session(
        &self,
        session: &mut ClientSession,
    ) -> Result<String, ClientError> {
        if let Some(token) = session.auth_token() {
            return Ok(token.to_string());
        }

        let credentials = self.config.credentials();
        let response = exchange_credentials(&self.http_client, credentials).await?;
        let token = response.auth_token.clone();
        session.store(response);

        tracing::debug!(
            "Authenticated with Kazoo using {} credentials",
            credentials.kind()
        );

        Ok(token)
    }

    /// Drops `rejected` if it is still the current token, then authenticates.
    async fn reauthenticate(&self, rejected: &str) -> Result<String, ClientError> {
        let mut session = self.session.lock().await;
        if session.auth_token() == Some(rejected) {
            session.clear();
        }
        self.authenticate_session(&mut session).await
    }

    /// Sends a request through the shared pipeline.
    ///
    /// Requests with `auth_required` carry the current token, authenticating
    /// first if none is held. When Kazoo rejects the token, the client
    /// re-authenticates and sends the request once more. No other failure
    /// is retried.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] if (re-)authentication fails
    /// - [`ClientError::Http`] if the request fails; a token rejected on the
    ///   retry surfaces as [`HttpError::Unauthorized`]
    pub async fn execute(&self, request: HttpRequest) -> Result<Value, ClientError> {
        if !request.auth_required {
            let response = self.http_client.request(&request, None).await?;
            return Ok(response.body);
        }

        let token = self.authenticate().await?;
        match self.http_client.request(&request, Some(&token)).await {
            Ok(response) => Ok(response.body),
            Err(HttpError::Unauthorized(error)) => {
                tracing::error!(
                    "Kazoo authentication failed. Attempting to re-authenticate and retry: {}",
                    error
                );
                let token = self.reauthenticate(&token).await?;
                let response = self.http_client.request(&request, Some(&token)).await?;
                Ok(response.body)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Sends an arbitrary request once, without re-authentication.
    ///
    /// Caller headers override the defaults (`Content-Type:
    /// application/json` and the current `X-Auth-Token`). `data` is the
    /// complete body; JSON bodies are not wrapped in an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the request cannot be sent, or a 2xx
    /// body is not valid JSON. Non-2xx responses are not errors; they are
    /// returned as [`ManualResponse::Failure`].
    pub async fn manual_request(
        &self,
        path: &str,
        method: HttpMethod,
        headers: Option<HashMap<String, String>>,
        data: Option<RequestBody>,
        files: Vec<FileAttachment>,
    ) -> Result<ManualResponse, ClientError> {
        let headers = headers.unwrap_or_default();
        let has_content_type = headers
            .keys()
            .any(|key| key.eq_ignore_ascii_case("content-type"));

        let mut builder = HttpRequest::builder(method, path);
        if data.is_none() && files.is_empty() && !has_content_type {
            builder = builder.header("Content-Type", JSON_CONTENT_TYPE);
        }
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        if let Some(data) = data {
            builder = builder.body(data);
        }
        for file in files {
            builder = builder.file(file);
        }
        let request = builder.build()?;

        let token = self.auth_token().await;
        let response = self.http_client.send(&request, token.as_deref()).await?;
        Ok(ManualResponse::from_response(response)?)
    }

    /// Searches the number inventory for available numbers.
    ///
    /// `GET /phone_numbers?prefix={prefix}&quantity={quantity}`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn search_phone_numbers(
        &self,
        prefix: &str,
        quantity: u32,
    ) -> Result<Value, ClientError> {
        let request = HttpRequest::builder(HttpMethod::Get, "/phone_numbers")
            .query_param("prefix", prefix)
            .query_param("quantity", quantity.to_string())
            .build()?;
        self.execute(request).await
    }

    /// Adds a number to an account.
    ///
    /// `PUT /accounts/{account_id}/phone_numbers/{phone_number}`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn create_phone_number(
        &self,
        account_id: &str,
        phone_number: &str,
    ) -> Result<Value, ClientError> {
        let request = HttpRequest::builder(HttpMethod::Put, phone_number_path(account_id, phone_number))
            .body(RequestBody::envelope(json!({})))
            .build()?;
        self.execute(request).await
    }

    /// Fetches one number of an account.
    ///
    /// `GET /accounts/{account_id}/phone_numbers/{phone_number}`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get_phone_number(
        &self,
        account_id: &str,
        phone_number: &str,
    ) -> Result<Value, ClientError> {
        let request =
            HttpRequest::builder(HttpMethod::Get, phone_number_path(account_id, phone_number))
                .build()?;
        self.execute(request).await
    }

    /// Uploads the audio of a media document.
    ///
    /// `POST /accounts/{account_id}/media/{media_id}/raw` with the bytes as
    /// the body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn upload_media_file(
        &self,
        account_id: &str,
        media_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ClientError> {
        let path = build_path(
            "/accounts/{account_id}/media/{media_id}/raw",
            &[("account_id", account_id), ("media_id", media_id)],
        );
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(RequestBody::Raw {
                bytes,
                content_type: content_type.to_string(),
            })
            .build()?;
        self.execute(request).await
    }

    /// Attaches a document to a number, as a multipart upload.
    ///
    /// `POST /accounts/{account_id}/phone_numbers/{phone_number}/docs/{file_name}`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn upload_phone_number_file(
        &self,
        account_id: &str,
        phone_number: &str,
        file: FileAttachment,
    ) -> Result<Value, ClientError> {
        let path = build_path(
            "/accounts/{account_id}/phone_numbers/{phone_number}/docs/{filename}",
            &[
                ("account_id", account_id),
                ("phone_number", phone_number),
                ("filename", file.file_name.as_str()),
            ],
        );
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .file(file)
            .build()?;
        self.execute(request).await
    }

    /// Lists the devices owned by a user.
    ///
    /// `GET /accounts/{account_id}/devices?filter_owner_id={owner_id}`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn list_devices_by_owner(
        &self,
        account_id: &str,
        owner_id: &str,
    ) -> Result<Value, ClientError> {
        let path = build_path("/accounts/{account_id}/devices", &[("account_id", account_id)]);
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("filter_owner_id", owner_id)
            .build()?;
        self.execute(request).await
    }

    /// Lists the direct children of an account.
    ///
    /// `GET /accounts/{account_id}/children`
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn list_child_accounts(&self, account_id: &str) -> Result<Value, ClientError> {
        let path = build_path("/accounts/{account_id}/children", &[("account_id", account_id)]);
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.execute(request).await
    }

    /// Uploads a CSV rate deck.
    ///
    /// The file is read completely before the request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] with [`HttpError::Io`] if the file
    /// cannot be read, otherwise see [`manual_request`](Self::manual_request).
    pub async fn upload_ratedeck(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ManualResponse, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(HttpError::Io)?;
        let headers = HashMap::from([("Content-Type".to_string(), "text/csv".to_string())]);
        let body = RequestBody::Raw {
            bytes,
            content_type: "text/csv".to_string(),
        };
        self.manual_request("/rates", HttpMethod::Post, Some(headers), Some(body), Vec::new())
            .await
    }

    /// Adds service plans to an account.
    ///
    /// # Errors
    ///
    /// See [`manual_request`](Self::manual_request).
    pub async fn add_service_plans_to_account(
        &self,
        account_id: &str,
        service_plan_ids: &[&str],
    ) -> Result<ManualResponse, ClientError> {
        let path = build_path(
            "/accounts/{account_id}/service_plans",
            &[("account_id", account_id)],
        );
        let body = RequestBody::envelope(json!({ "add": service_plan_ids }));
        self.manual_request(&path, HttpMethod::Post, None, Some(body), Vec::new())
            .await
    }

    /// Lists the apps in an account's app store.
    ///
    /// # Errors
    ///
    /// See [`manual_request`](Self::manual_request).
    pub async fn list_apps(&self, account_id: &str) -> Result<ManualResponse, ClientError> {
        let path = build_path("/accounts/{account_id}/apps_store", &[("account_id", account_id)]);
        self.manual_request(&path, HttpMethod::Get, None, None, Vec::new())
            .await
    }

    /// Enables an app for an account.
    ///
    /// `allowed_users` is usually [`ALL_USERS`]; `users` lists user ids
    /// when it is `"specific"`.
    ///
    /// # Errors
    ///
    /// See [`manual_request`](Self::manual_request).
    pub async fn activate_app(
        &self,
        account_id: &str,
        app_id: &str,
        allowed_users: &str,
        users: &[&str],
    ) -> Result<ManualResponse, ClientError> {
        let path = build_path(
            "/accounts/{account_id}/apps_store/{app_id}",
            &[("account_id", account_id), ("app_id", app_id)],
        );
        let body = RequestBody::envelope(json!({
            "allowed_users": allowed_users,
            "users": users,
        }));
        self.manual_request(&path, HttpMethod::Put, None, Some(body), Vec::new())
            .await
    }

    /// Enables every app in the app store for all users of an account.
    ///
    /// Returns one outcome per app, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the app listing fails, otherwise see
    /// [`manual_request`](Self::manual_request).
    pub async fn activate_apps(&self, account_id: &str) -> Result<Vec<ManualResponse>, ClientError> {
        let apps = self.list_apps(account_id).await?.into_result()?;

        let mut outcomes = Vec::new();
        for app_id in apps
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|app| app.get("id").and_then(Value::as_str))
        {
            outcomes.push(self.activate_app(account_id, app_id, ALL_USERS, &[]).await?);
        }
        Ok(outcomes)
    }

    /// Calls a SUP (system maintenance) command over the API.
    ///
    /// `GET /sup/{module}/{function}/{args...}`. A `_maintenance` suffix is
    /// dropped from the module name, so `kazoo_maintenance` and `kazoo` are
    /// the same module.
    ///
    /// # Errors
    ///
    /// See [`manual_request`](Self::manual_request).
    pub async fn sup(
        &self,
        module: &str,
        function: &str,
        args: &[&str],
    ) -> Result<ManualResponse, ClientError> {
        let path = sup_path(module, function, args);
        self.manual_request(&path, HttpMethod::Get, None, None, Vec::new())
            .await
    }
}

fn phone_number_path(account_id: &str, phone_number: &str) -> String {
    build_path(
        "/accounts/{account_id}/phone_numbers/{phone_number}",
        &[("account_id", account_id), ("phone_number", phone_number)],
    )
}

fn sup_path(module: &str, function: &str, args: &[&str]) -> String {
    let module = module.strip_suffix("_maintenance").unwrap_or(module);
    let mut path = String::from("/sup");
    for segment in [module, function].iter().chain(args) {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}
