//! Navigation controller: history integration, click interception and render
//! dispatch.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --start()--> Idle --render--> Rendering --> Idle
//! ```
//!
//! Every render cycle bumps a generation counter and cancels the previous
//! cycle's token. A view's deferred data load is only applied when it
//! belongs to the current generation, so a slow response for a page the user
//! already left can never overwrite the page they are on.

use std::fmt;

use elimu_api::CancellationSource;
use elimu_router::{Page, RouteTable, normalize_path};

use crate::error::Result;
use crate::event::{EventOutcome, NavEvent, resolve_location};
use crate::history::{History, Viewport};
use crate::mount::MountPoint;
use crate::view::ViewNode;
use crate::views::{CONTENT_SLOT, DataLoad, ViewContext, render_page, status};

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Id of the element views are mounted into.
pub const MOUNT_ID: &str = "page-content";

/// Navigation state owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Normalized path of the last render.
    pub current_path: String,
    /// Set once by [`NavigationController::start`].
    pub initialized: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_path: "/".to_string(),
            initialized: false,
        }
    }
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// `start` has not run; events are not listened to yet.
    Uninitialized,
    /// Waiting for the next navigation.
    Idle,
    /// Building and mounting a view.
    Rendering,
}

/// Options for [`NavigationController::navigate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Push a new history entry.
    #[must_use]
    pub fn push() -> Self {
        Self { replace: false }
    }

    /// Replace the current history entry.
    #[must_use]
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// What a render cycle mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The page's view.
    Matched(Page),
    /// The "not found" view; no route matched.
    NotFound,
    /// The generic error view; the page's view failed to build.
    Failed,
}

/// What happened to a deferred data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The data was mounted into the current view.
    Applied,
    /// The load belonged to a superseded render cycle, or was cancelled, and
    /// was discarded.
    Stale,
    /// The load failed; an error banner was mounted in its place.
    Failed,
}

/// A deferred data load tagged with the render cycle that started it.
pub struct PendingLoad {
    generation: u64,
    load: DataLoad,
}

impl PendingLoad {
    /// Render cycle this load belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the load to completion.
    pub async fn finish(self) -> CompletedLoad {
        CompletedLoad {
            generation: self.generation,
            result: self.load.await,
        }
    }
}

impl fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Result of a finished [`PendingLoad`], ready for [`NavigationController::apply`].
#[derive(Debug)]
pub struct CompletedLoad {
    generation: u64,
    result: Result<ViewNode>,
}

impl CompletedLoad {
    /// Render cycle the load belonged to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the mount point and decides what is rendered into it.
pub struct NavigationController<H, V> {
    routes: RouteTable<Page>,
    context: ViewContext,
    history: H,
    viewport: V,
    origin: String,
    mount: MountPoint,
    state: NavigationState,
    phase: ControllerState,
    generation: u64,
    cycle: CancellationSource,
    pending: Option<PendingLoad>,
}

impl<H: History, V: Viewport> NavigationController<H, V> {
    /// Controller over `routes`, reading the location from `history`.
    pub fn new(routes: RouteTable<Page>, context: ViewContext, history: H, viewport: V) -> Self {
        Self {
            routes,
            context,
            history,
            viewport,
            origin: DEFAULT_ORIGIN.to_string(),
            mount: MountPoint::new(MOUNT_ID),
            state: NavigationState::default(),
            phase: ControllerState::Uninitialized,
            generation: 0,
            cycle: CancellationSource::new(),
            pending: None,
        }
    }

    /// Set the origin used to recognise same-origin links.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    /// Start listening for events and render the current location.
    ///
    /// Initialization happens once; later calls only re-render.
    pub fn start(&mut self) -> Resolution {
        if self.phase == ControllerState::Uninitialized {
            tracing::info!("Navigation controller initialized");
            self.state.initialized = true;
            self.phase = ControllerState::Idle;
        }
        self.render()
    }

    /// Move to `to`, pushing or replacing a history entry, then render.
    ///
    /// Returns `None` and does nothing when `to` is blank.
    pub fn navigate(&mut self, to: &str, options: NavigateOptions) -> Option<Resolution> {
        if to.trim().is_empty() {
            tracing::warn!("Ignoring navigation to an empty location");
            return None;
        }

        let location = resolve_location(to, &self.origin);
        tracing::info!("Navigating to {} (replace={})", location, options.replace);
        if options.replace {
            self.history.replace(&location);
        } else {
            self.history.push(&location);
        }
        Some(self.render())
    }

    /// React to a browser event.
    ///
    /// Events arriving before [`start`](Self::start) are ignored.
    pub fn handle_event(&mut self, event: NavEvent) -> EventOutcome {
        if self.phase == ControllerState::Uninitialized {
            tracing::debug!("Ignoring {:?} before start", event);
            return EventOutcome::Ignored;
        }

        match event {
            NavEvent::PopState => {
                tracing::info!("History moved to {}", self.history.location());
                self.render();
                EventOutcome::Handled
            }
            NavEvent::Click(target) => match target.intercept(&self.origin) {
                Some(href) => {
                    let href = href.to_string();
                    self.navigate(&href, NavigateOptions::push());
                    EventOutcome::Handled
                }
                None => EventOutcome::Ignored,
            },
        }
    }

    /// Render the current history location into the mount point.
    fn render(&mut self) -> Resolution {
        let resting = match self.phase {
            ControllerState::Uninitialized => ControllerState::Uninitialized,
            _ => ControllerState::Idle,
        };
        self.phase = ControllerState::Rendering;

        self.generation += 1;
        self.cycle.cancel();
        self.cycle = CancellationSource::new();
        if let Some(stale) = self.pending.take() {
            tracing::debug!(
                "Dropping load from superseded generation {}",
                stale.generation
            );
        }

        let path = normalize_path(self.history.location());
        self.state.current_path.clone_from(&path);

        let resolution = match self.routes.match_path(&path) {
            None => {
                tracing::warn!("No route for {}", path);
                self.mount.mount(status::not_found().into());
                Resolution::NotFound
            }
            Some(hit) => {
                let page = *hit.route.target();
                tracing::debug!("Rendering {} {}", hit.route.name(), hit.params);

                match render_page(page, &hit.params, &self.context, &self.cycle.token()) {
                    Ok(view) => {
                        self.mount.mount(view.node);
                        self.pending = view.load.map(|load| PendingLoad {
                            generation: self.generation,
                            load,
                        });
                        Resolution::Matched(page)
                    }
                    Err(err) => {
                        tracing::error!("Render error on {}: {}", path, err);
                        self.mount.mount(status::render_error().into());
                        Resolution::Failed
                    }
                }
            }
        };

        self.viewport.scroll_to_top();
        self.phase = resting;
        resolution
    }

    /// Take the current cycle's deferred load, leaving none pending.
    pub fn take_pending(&mut self) -> Option<PendingLoad> {
        self.pending.take()
    }

    /// Whether the current view is waiting for data.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Mount a finished load if it belongs to the current render cycle.
    pub fn apply(&mut self, completed: CompletedLoad) -> LoadOutcome {
        if completed.generation != self.generation {
            tracing::debug!(
                "Discarding stale load from generation {} (current {})",
                completed.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        match completed.result {
            Ok(node) => {
                if self.mount.fill_slot(CONTENT_SLOT, node) {
                    LoadOutcome::Applied
                } else {
                    tracing::warn!("Mounted view has no {} slot", CONTENT_SLOT);
                    LoadOutcome::Failed
                }
            }
            Err(err) if err.is_cancelled() => {
                tracing::debug!("Load for generation {} was cancelled", completed.generation);
                LoadOutcome::Stale
            }
            Err(err) => {
                tracing::error!("Data load failed: {}", err);
                self.mount.fill_slot(
                    CONTENT_SLOT,
                    status::error_banner("An unexpected error occurred.").into(),
                );
                LoadOutcome::Failed
            }
        }
    }

    /// Run the pending load, if any, and apply it.
    pub async fn settle(&mut self) -> Option<LoadOutcome> {
        let pending = self.pending.take()?;
        let completed = pending.finish().await;
        Some(self.apply(completed))
    }

    /// Navigation state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Controller phase.
    #[must_use]
    pub fn phase(&self) -> ControllerState {
        self.phase
    }

    /// Current render generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The mount point.
    #[must_use]
    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    /// Route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable<Page> {
        &self.routes
    }

    /// Session history.
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Session history, for simulating back/forward before a
    /// [`NavEvent::PopState`].
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Origin used for link interception.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}
