//! HTTP gateway to the Elimu Online backend.
//!
//! This crate wraps every backend call the storefront makes:
//!
//! - [`ApiConfig`] picks the backend once, from the host the app runs on
//! - [`ApiClient::request`] sends JSON requests and classifies failures into [`ApiError`]
//! - typed endpoint wrappers cover resources, accounts and M-Pesa payments
//! - [`AuthStore`] is the injected home of the bearer token
//! - [`CancellationSource`] lets navigation abandon requests it no longer needs
//!
//! # Error classification
//!
//! | Situation                       | Result                                  |
//! |---------------------------------|-----------------------------------------|
//! | DNS failure, refused, timeout   | [`ApiError::Network`], `status() == 0`  |
//! | Non-2xx response                | [`ApiError::Http`] with the status      |
//! | `204 No Content`                | `Ok(None)`                              |
//!
//! Nothing is cached and nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use elimu_api::{ApiClient, ApiConfig, MemoryAuthStore, PRODUCTION_API_URL};
//!
//! async fn list() -> elimu_api::Result<()> {
//!     let config = ApiConfig::for_host("localhost", PRODUCTION_API_URL);
//!     let client = ApiClient::new(config, Arc::new(MemoryAuthStore::new()))?;
//!
//!     for resource in client.fetch_resources().await? {
//!         println!("{} ({})", resource.display_title(), resource.price_label());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod cancel;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod source;

pub use auth::{AuthStore, FileAuthStore, MemoryAuthStore};
pub use cancel::{CancellationSource, CancellationToken};
pub use client::{ApiClient, AuthMode, RequestOptions};
pub use config::{ApiConfig, DEFAULT_TIMEOUT, LOCAL_API_URL, PRODUCTION_API_URL};
pub use error::{ApiError, Result};
pub use source::ResourceSource;
