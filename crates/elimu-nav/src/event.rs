//! Events the navigation controller reacts to.

/// Input delivered to [`NavigationController::handle_event`](crate::NavigationController::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The user moved through history (back/forward).
    PopState,
    /// A click on, or inside, an anchor-like element.
    Click(ClickTarget),
}

/// Whether the controller consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The controller navigated; the default action is suppressed.
    Handled,
    /// The host should perform its default action.
    Ignored,
}

/// The nearest anchor-like element of a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// `href`, or `data-href` for non-anchor elements.
    pub href: Option<String>,
    /// `data-nav="true"` opt-in marker.
    pub nav: bool,
    /// `target` attribute.
    pub target: Option<String>,
    /// `download` attribute is present.
    pub download: bool,
}

impl ClickTarget {
    /// A link that opts into client-side navigation.
    #[must_use]
    pub fn nav_link(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            nav: true,
            ..Self::default()
        }
    }

    /// A plain link without the navigation marker.
    #[must_use]
    pub fn plain_link(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Set the `target` attribute.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Mark as a download link.
    #[must_use]
    pub fn with_download(mut self) -> Self {
        self.download = true;
        self
    }

    /// The location to navigate to, when the click should be intercepted.
    ///
    /// Only same-origin links carrying the navigation marker qualify;
    /// `_blank` targets and download links are left to the host.
    #[must_use]
    pub fn intercept(&self, origin: &str) -> Option<&str> {
        let href = self.href.as_deref().filter(|href| !href.is_empty())?;
        if !self.nav || self.download || self.target.as_deref() == Some("_blank") {
            return None;
        }
        if is_absolute_http(href) && strip_origin(href, origin).is_none() {
            return None;
        }
        Some(href)
    }
}

fn is_absolute_http(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The part of `href` after `origin`, when `href` is on that origin.
///
/// The origin must end at a path, query or fragment boundary, so
/// `http://localhost:51730` is not on `http://localhost:5173`.
fn strip_origin<'a>(href: &'a str, origin: &str) -> Option<&'a str> {
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() {
        return None;
    }
    let rest = href.strip_prefix(origin)?;
    (rest.is_empty() || rest.starts_with(['/', '?', '#'])).then_some(rest)
}

/// Turn an href into a location relative to `origin`.
///
/// Same-origin absolute URLs lose their origin, other absolute URLs keep
/// only their path, and relative paths gain a leading slash.
#[must_use]
pub fn resolve_location(href: &str, origin: &str) -> String {
    let rest = if let Some(rest) = strip_origin(href, origin) {
        rest
    } else if is_absolute_http(href) {
        let after_scheme = href.split_once("://").map_or(href, |(_, after)| after);
        after_scheme
            .find(['/', '?', '#'])
            .map_or("", |index| &after_scheme[index..])
    } else {
        href
    };

    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{rest}")
    }
}
