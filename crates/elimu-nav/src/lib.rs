//! Navigation and page rendering for the Elimu Online storefront.
//!
//! The [`NavigationController`] resolves the current history location through
//! the route table, builds the matching page view and mounts it into a single
//! [`MountPoint`]. Misses mount a "not found" view and view failures mount a
//! generic error view; neither escapes the controller.
//!
//! Views are typed [`ViewNode`] trees serialized with escaping, so backend
//! strings are always rendered as text.
//!
//! Listing pages render in two passes: a skeleton with a loading placeholder,
//! then a deferred load fills the content slot. Loads from superseded render
//! cycles are cancelled and discarded.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use elimu_api::{ApiClient, ApiConfig, MemoryAuthStore};
//! use elimu_nav::{MemoryHistory, MemoryViewport, NavigationController, ViewContext};
//! use elimu_router::app_routes;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = Arc::new(MemoryAuthStore::new());
//! let client = Arc::new(ApiClient::new(ApiConfig::default(), auth.clone())?);
//! let context = ViewContext::new(client, auth);
//!
//! let mut nav = NavigationController::new(
//!     app_routes()?,
//!     context,
//!     MemoryHistory::new("/notes"),
//!     MemoryViewport::new(),
//! );
//! nav.start();
//! nav.settle().await;
//! println!("{}", nav.mount().html());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod controller;
pub mod error;
pub mod event;
pub mod history;
pub mod mount;
pub mod view;
pub mod views;

pub use controller::{
    CompletedLoad, ControllerState, DEFAULT_ORIGIN, LoadOutcome, MOUNT_ID, NavigateOptions,
    NavigationController, NavigationState, PendingLoad, Resolution,
};
pub use error::{RenderError, Result};
pub use event::{ClickTarget, EventOutcome, NavEvent, resolve_location};
pub use history::{History, MemoryHistory, MemoryViewport, Viewport};
pub use mount::MountPoint;
pub use view::{Element, ViewNode, el, escape, nav_link, text};
pub use views::{CONTENT_SLOT, DataLoad, View, ViewContext, render_page};
