//! REST resource infrastructure for the Kazoo API.
//!
//! This module turns declarative resource descriptions into client methods:
//!
//! - **[`RestResource`]**: A descriptor built from a name and URL template
//!   that builds [`HttpRequest`](crate::clients::HttpRequest)s for its
//!   operations and extra views
//! - **[`ExtraView`]**: A non-CRUD sub-path such as `/status` or `/deployment`
//! - **Path building**: [`parse_placeholders`] and [`build_path`]
//! - **[`resources`]**: The Kazoo resource table, expanded by the
//!   `rest_resources!` macro into methods on
//!   [`KazooClient`](crate::KazooClient)
//!
//! # Example: Using Generated Methods
//!
//! ```rust,ignore
//! use kazoo_api::{KazooClient, KazooConfig, ApiKey};
//! use serde_json::json;
//!
//! let client = KazooClient::new(
//!     KazooConfig::builder().api_key(ApiKey::new("my-api-key")?).build()?,
//! )?;
//! client.authenticate().await?;
//!
//! // GET /accounts/acc1/users
//! let users = client.get_users("acc1").await?;
//!
//! // PUT /accounts/acc1/users
//! let created = client
//!     .create_user("acc1", json!({"first_name": "Ada", "last_name": "Lovelace"}))
//!     .await?;
//!
//! // POST /accounts/acc1/users/user1
//! client.update_user("acc1", "user1", json!({"enabled": false})).await?;
//!
//! // DELETE /accounts/acc1/users/user1
//! client.delete_user("acc1", "user1").await?;
//! ```
//!
//! # Example: Introspecting the Registry
//!
//! ```rust
//! use kazoo_api::rest::resources::{generated_methods, resources};
//!
//! assert!(resources().iter().any(|(name, _)| *name == "USERS"));
//! assert!(generated_methods().iter().any(|m| m.name == "get_hotdesk"));
//! ```

mod macros;
mod path;
mod resource;
pub mod resources;

pub use macros::{resolve, GeneratedMethod, MethodKind, ResourceCell};
pub use path::{build_path, collection_template, parse_placeholders, ResourceOperation};
pub use resource::{ExtraView, RestResource, RestResourceBuilder, ViewScope};
