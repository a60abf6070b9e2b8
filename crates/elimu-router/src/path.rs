//! Path normalization applied before matching.

/// Reduce a location to the path the route table matches against.
///
/// Drops the fragment and query string, strips trailing slashes (the root
/// stays `/`) and guarantees a leading slash. The result is idempotent:
/// normalizing an already normalized path returns it unchanged.
///
/// # Examples
///
/// ```
/// use elimu_router::normalize_path;
///
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("/notes?page=2#top"), "/notes");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = location[..end].trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Whether `path` is already in normalized form.
#[must_use]
pub fn is_normalized(path: &str) -> bool {
    normalize_path(path) == path
}
