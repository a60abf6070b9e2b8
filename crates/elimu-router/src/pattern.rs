//! Route patterns and extracted parameters.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Character class a dynamic segment must satisfy: lowercase ASCII
/// letters, digits and hyphens.
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid segment regex"));

/// Parameters extracted from a matched path, plus route defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// Shape of a path a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Exactly this normalized path, e.g. `/about`.
    Static(String),
    /// `prefix/<segment>`, binding the segment to `param`.
    ///
    /// The segment must match `[a-z0-9-]+`.
    Dynamic {
        /// Fixed leading path, e.g. `/levels`.
        prefix: String,
        /// Name the segment is bound to.
        param: String,
    },
}

impl RoutePattern {
    /// Static pattern for `path`.
    #[must_use]
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Static(path.into())
    }

    /// Dynamic single-segment pattern under `prefix`.
    #[must_use]
    pub fn segment(prefix: impl Into<String>, param: impl Into<String>) -> Self {
        Self::Dynamic {
            prefix: prefix.into(),
            param: param.into(),
        }
    }

    /// Match a normalized path, returning captured parameters.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        match self {
            Self::Static(expected) => (path == expected).then(Params::new),
            Self::Dynamic { prefix, param } => {
                let rest = path.strip_prefix(prefix.as_str())?;
                let segment = rest.strip_prefix('/')?;
                SEGMENT.is_match(segment).then(|| {
                    let mut params = Params::new();
                    params.insert(param.clone(), segment);
                    params
                })
            }
        }
    }

    /// Path literal used for validation and display.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Static(path) => path,
            Self::Dynamic { prefix, .. } => prefix,
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(path) => f.write_str(path),
            Self::Dynamic { prefix, param } => write!(f, "{prefix}/:{param}"),
        }
    }
}
