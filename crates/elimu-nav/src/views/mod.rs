//! Page view builders.
//!
//! Each builder returns a [`View`]: the subtree to mount right away and,
//! for pages that list resources, a deferred [`DataLoad`] whose result fills
//! the view's [`CONTENT_SLOT`] once the backend answers.

use std::fmt;
use std::sync::Arc;

use elimu_api::{AuthStore, CancellationToken, ResourceSource};
use elimu_router::{Page, Params};
use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::view::ViewNode;

pub mod about;
pub mod account;
pub mod card;
pub mod dashboard;
pub mod home;
pub mod level;
pub mod status;

/// Slot a deferred load fills.
pub const CONTENT_SLOT: &str = "content";

/// Second render pass of a view, producing the data-dependent subtree.
pub type DataLoad = BoxFuture<'static, Result<ViewNode>>;

/// A freshly built view.
pub struct View {
    /// Subtree mounted immediately.
    pub node: ViewNode,
    /// Work that fills [`CONTENT_SLOT`] later.
    pub load: Option<DataLoad>,
}

impl View {
    /// A view with no deferred work.
    #[must_use]
    pub fn ready(node: impl Into<ViewNode>) -> Self {
        Self {
            node: node.into(),
            load: None,
        }
    }

    /// A skeleton view whose content slot is filled by `load`.
    #[must_use]
    pub fn deferred(node: impl Into<ViewNode>, load: DataLoad) -> Self {
        Self {
            node: node.into(),
            load: Some(load),
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("node", &self.node)
            .field("deferred", &self.load.is_some())
            .finish()
    }
}

/// Services views read from.
#[derive(Clone)]
pub struct ViewContext {
    resources: Arc<dyn ResourceSource>,
    auth: Arc<dyn AuthStore>,
}

impl ViewContext {
    /// Context backed by `resources` and `auth`.
    pub fn new(resources: Arc<dyn ResourceSource>, auth: Arc<dyn AuthStore>) -> Self {
        Self { resources, auth }
    }

    /// Resource listing source.
    #[must_use]
    pub fn resources(&self) -> &Arc<dyn ResourceSource> {
        &self.resources
    }

    /// Session store.
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthStore> {
        &self.auth
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("signed_in", &self.auth.get_token().is_some())
            .finish_non_exhaustive()
    }
}

/// Build the view for `page`.
///
/// `cancel` fires when the render cycle is superseded; deferred loads pass it
/// on to the backend request.
pub fn render_page(
    page: Page,
    params: &Params,
    ctx: &ViewContext,
    cancel: &CancellationToken,
) -> Result<View> {
    match page {
        Page::Home => Ok(View::ready(home::home())),
        Page::About => Ok(View::ready(about::about())),
        Page::Signup => Ok(View::ready(account::signup())),
        Page::Login => Ok(View::ready(account::login(ctx))),
        Page::Dashboard => dashboard::dashboard(params, ctx, cancel),
        Page::LevelResources => level::level_resources(params, ctx, cancel),
    }
}
