//! Kazoo API client facade.
//!
//! This module provides [`KazooClient`], the single entry point of the SDK,
//! built on top of the [`HttpClient`](crate::clients::HttpClient):
//!
//! - [`KazooClient`]: Authentication, the retrying execution pipeline, the
//!   generated resource methods and hand-written operations
//! - [`ManualResponse`]: The outcome of an unretried manual request
//! - [`ClientError`]: Error type of every client method
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::{KazooClient, KazooConfig, ManualResponse};
//!
//! let client = KazooClient::new(KazooConfig::from_env()?)?;
//! client.authenticate().await?;
//!
//! let account = client.get_account("acc1").await?;
//! println!("Account name: {}", account["data"]["name"]);
//!
//! if let ManualResponse::Success(result) = client.sup("kazoo_maintenance", "flush", &[]).await? {
//!     println!("Flushed: {result}");
//! }
//! ```

mod client;
mod errors;
mod manual;

pub use client::{KazooClient, ALL_USERS, DEFAULT_SEARCH_QUANTITY};
pub use errors::ClientError;
pub use manual::ManualResponse;
