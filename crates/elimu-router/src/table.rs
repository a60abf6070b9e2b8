//! Ordered route table with first-match-wins lookup.

use std::collections::HashSet;

use crate::error::{Result, RouterError};
use crate::path::{is_normalized, normalize_path};
use crate::pattern::{Params, RoutePattern};

/// One entry of the route table.
///
/// `target` is whatever the caller dispatches on, typically an enum naming
/// the view to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<T> {
    name: String,
    pattern: RoutePattern,
    defaults: Params,
    target: T,
}

impl<T> Route<T> {
    /// Route named `name` rendering `target` for paths matching `pattern`.
    pub fn new(name: impl Into<String>, pattern: RoutePattern, target: T) -> Self {
        Self {
            name: name.into(),
            pattern,
            defaults: Params::new(),
            target,
        }
    }

    /// Add a fixed parameter carried by every match of this route.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name, value);
        self
    }

    /// Route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Fixed parameters.
    #[must_use]
    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Dispatch target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    fn matches(&self, path: &str) -> Option<Params> {
        let mut params = self.pattern.captures(path)?;
        for (name, value) in self.defaults.iter() {
            if params.get(name).is_none() {
                params.insert(name, value);
            }
        }
        Some(params)
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The first route whose pattern accepted the path.
    pub route: &'a Route<T>,
    /// Captured segment plus route defaults.
    pub params: Params,
}

/// Immutable ordered list of routes.
///
/// Lookup is a linear scan; registration order decides precedence, so more
/// specific routes must be registered before overlapping ones.
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<Route<T>>,
}

impl<T> RouteTable<T> {
    /// Build a table, rejecting duplicate names and non-normalized paths.
    pub fn new(routes: Vec<Route<T>>) -> Result<Self> {
        let mut names = HashSet::new();
        for route in &routes {
            if !names.insert(route.name.as_str()) {
                return Err(RouterError::DuplicateName(route.name.clone()));
            }
            if !is_normalized(route.pattern.path()) {
                return Err(RouterError::UnnormalizedPath {
                    name: route.name.clone(),
                    path: route.pattern.path().to_string(),
                });
            }
            if let RoutePattern::Dynamic { param, .. } = &route.pattern
                && param.is_empty()
            {
                return Err(RouterError::EmptyParam(route.name.clone()));
            }
        }
        Ok(Self { routes })
    }

    /// Resolve `location` to the first matching route.
    ///
    /// The location is normalized first, so `/about/` and `/about?x=1`
    /// behave like `/about`.
    #[must_use]
    pub fn match_path(&self, location: &str) -> Option<RouteMatch<'_, T>> {
        let path = normalize_path(location);
        let hit = self.routes.iter().find_map(|route| {
            route
                .matches(&path)
                .map(|params| RouteMatch { route, params })
        });

        match &hit {
            Some(hit) => tracing::debug!("Matched {} to route {}", path, hit.route.name),
            None => tracing::debug!("No route matches {}", path),
        }
        hit
    }

    /// Route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route<T>> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Routes in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &Route<T>> {
        self.routes.iter()
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
