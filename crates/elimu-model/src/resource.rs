//! Resource records: the raw backend shape and its canonical normalized form.
//!
//! Backends deployed over time disagree on field names (`file_url` vs `file`,
//! `is_free` vs `isFree`, `preview_url` vs `previewUrl`, `signed_url`). The
//! normalizer resolves every field through a fixed precedence list so views
//! only ever see [`NormalizedResource`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Public bucket that relative file paths live under.
pub const PUBLIC_BUCKET_URL: &str = "https://storage.googleapis.com/elimu-online-resources-2025/";

const DOWNLOAD_KEYS: &[&str] = &["signed_url", "signedUrl", "file_url", "fileUrl", "file"];
const PREVIEW_KEYS: &[&str] = &["preview_url", "previewUrl", "file_url", "fileUrl"];
const FREE_KEYS: &[&str] = &["is_free", "isFree"];
const CREATED_KEYS: &[&str] = &["created_at", "uploaded_at", "createdAt", "uploadedAt"];
const CATEGORY_KEYS: &[&str] = &["category_display", "categoryDisplay", "category"];
const LEVEL_KEYS: &[&str] = &["level_display", "levelDisplay", "level"];
const TERM_KEYS: &[&str] = &["term_display", "termDisplay", "term"];

// =============================================================================
// RAW RESOURCE
// =============================================================================

/// Backend-shaped resource record, kept as an untyped JSON object.
///
/// Non-object JSON values become an empty record rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResource(Map<String, Value>);

impl RawResource {
    /// Wrap an arbitrary JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First key holding a non-empty string (or a number, rendered as text).
    fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// First key present with a non-null value.
    fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .find_map(|key| self.0.get(*key).filter(|value| !value.is_null()))
    }
}

impl From<Value> for RawResource {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

// =============================================================================
// NORMALIZED RESOURCE
// =============================================================================

/// How to treat a record that carries no free/paid flag at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FreePolicy {
    /// Missing flag means paid. The default.
    #[default]
    MissingIsPaid,
    /// Missing flag means free, as the earliest backend behaved.
    MissingIsFree,
}

/// Canonical resource shape consumed by every view.
///
/// `is_free == true` makes `price` informational only. `preview_url` and
/// `download_url` are independent and either may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResource {
    /// Backend identifier.
    pub id: Option<i64>,
    /// Resource title.
    pub title: Option<String>,
    /// Category display value, or the raw code.
    pub category: Option<String>,
    /// Level display value, or the raw code.
    pub level: Option<String>,
    /// Term display value, or the raw code.
    pub term: Option<String>,
    /// Whether the resource can be opened without paying.
    pub is_free: bool,
    /// Price in Ksh.
    pub price: f64,
    /// URL suitable for an inline preview.
    pub preview_url: Option<String>,
    /// URL for downloading the full file.
    pub download_url: Option<String>,
    /// Creation timestamp as sent by the backend.
    pub created_at: Option<String>,
    /// Original record.
    pub raw: RawResource,
}

impl NormalizedResource {
    /// Title to display, falling back to a placeholder.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled resource")
    }

    /// Price label shown on cards: `Free` or `Ksh <price>`.
    #[must_use]
    pub fn price_label(&self) -> String {
        if self.is_free {
            "Free".to_string()
        } else {
            format!("Ksh {}", format_price(self.price))
        }
    }

    /// Creation time parsed as RFC 3339, when the backend sent one.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// URL to open when the user previews the resource.
    #[must_use]
    pub fn best_preview(&self) -> Option<&str> {
        self.preview_url.as_deref().or(self.download_url.as_deref())
    }
}

/// Normalize a raw record, treating a missing free flag as paid.
#[must_use]
pub fn normalize(raw: &RawResource) -> NormalizedResource {
    normalize_with(raw, FreePolicy::default())
}

/// Normalize a raw record with an explicit policy for the missing free flag.
///
/// Never fails: absent or malformed fields default to `None`, `0.0` or the
/// policy's boolean.
#[must_use]
pub fn normalize_with(raw: &RawResource, policy: FreePolicy) -> NormalizedResource {
    let is_free = match raw.first_present(FREE_KEYS) {
        Some(value) => truthy(value),
        None => policy == FreePolicy::MissingIsFree,
    };

    NormalizedResource {
        id: raw.get("id").and_then(parse_id),
        title: raw.first_text(&["title"]),
        category: raw.first_text(CATEGORY_KEYS),
        level: raw.first_text(LEVEL_KEYS),
        term: raw.first_text(TERM_KEYS),
        is_free,
        price: raw.get("price").map_or(0.0, parse_price),
        preview_url: raw.first_text(PREVIEW_KEYS),
        download_url: raw.first_text(DOWNLOAD_KEYS),
        created_at: raw.first_text(CREATED_KEYS),
        raw: raw.clone(),
    }
}

/// Normalize a backend listing.
///
/// Accepts either a bare array or a paginated `{ "results": [...] }` envelope;
/// anything else yields an empty list.
#[must_use]
pub fn normalize_all(listing: &Value) -> Vec<NormalizedResource> {
    let items = match listing {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    items
        .iter()
        .map(|item| normalize(&RawResource::from_value(item.clone())))
        .collect()
}

/// Resolve a stored file path to a URL a browser can open.
///
/// Absolute `http(s)` URLs are returned unchanged; anything else is treated
/// as an object key in the public bucket.
#[must_use]
pub fn resolve_file_url(path: &str) -> String {
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        path.to_string()
    } else {
        format!("{PUBLIC_BUCKET_URL}{}", path.trim_start_matches('/'))
    }
}

// =============================================================================
// FIELD COERCION
// =============================================================================

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_price(value: &Value) -> f64 {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawResource {
        RawResource::from_value(value)
    }

    #[test]
    fn test_file_url_feeds_both_urls() {
        let resource = normalize(&raw(json!({"file_url": "a.pdf", "is_free": true})));
        assert_eq!(resource.download_url.as_deref(), Some("a.pdf"));
        assert_eq!(resource.preview_url.as_deref(), Some("a.pdf"));
        assert!(resource.is_free);
        assert_eq!(resource.price, 0.0);
    }

    #[test]
    fn test_signed_url_wins_download() {
        let resource = normalize(&raw(json!({"signed_url": "s.pdf", "file_url": "f.pdf"})));
        assert_eq!(resource.download_url.as_deref(), Some("s.pdf"));
        assert_eq!(resource.preview_url.as_deref(), Some("f.pdf"));
    }

    #[test]
    fn test_bare_file_is_download_only() {
        let resource = normalize(&raw(json!({"file": "resources/x.pdf"})));
        assert_eq!(resource.download_url.as_deref(), Some("resources/x.pdf"));
        assert_eq!(resource.preview_url, None);
    }

    #[test]
    fn test_null_and_empty_urls_are_skipped() {
        let resource = normalize(&raw(json!({
            "signed_url": null,
            "file_url": "",
            "file": "f.pdf",
            "preview_url": "  "
        })));
        assert_eq!(resource.download_url.as_deref(), Some("f.pdf"));
        assert_eq!(resource.preview_url, None);
    }

    #[test]
    fn test_missing_free_flag_depends_on_policy() {
        let record = raw(json!({"title": "Chemistry"}));
        assert!(!normalize(&record).is_free);
        assert!(normalize_with(&record, FreePolicy::MissingIsFree).is_free);
    }

    #[test]
    fn test_camel_case_free_flag() {
        assert!(normalize(&raw(json!({"isFree": true}))).is_free);
        assert!(normalize(&raw(json!({"isFree": "yes"}))).is_free);
        assert!(!normalize(&raw(json!({"is_free": 0}))).is_free);
        assert!(normalize(&raw(json!({"is_free": 1}))).is_free);
    }

    #[test]
    fn test_display_fields_win_over_codes() {
        let resource = normalize(&raw(json!({
            "category": "EBOOKS",
            "category_display": "E-Books",
            "level": "FORM4",
            "term": "T1",
            "termDisplay": "Term 1"
        })));
        assert_eq!(resource.category.as_deref(), Some("E-Books"));
        assert_eq!(resource.level.as_deref(), Some("FORM4"));
        assert_eq!(resource.term.as_deref(), Some("Term 1"));
    }

    #[test]
    fn test_price_from_decimal_string() {
        let resource = normalize(&raw(json!({"price": "125.00", "is_free": false})));
        assert_eq!(resource.price, 125.0);
        assert_eq!(resource.price_label(), "Ksh 125");

        let resource = normalize(&raw(json!({"price": "abc"})));
        assert_eq!(resource.price, 0.0);
    }

    #[test]
    fn test_id_accepts_number_or_numeric_string() {
        assert_eq!(normalize(&raw(json!({"id": 7}))).id, Some(7));
        assert_eq!(normalize(&raw(json!({"id": "12"}))).id, Some(12));
        assert_eq!(normalize(&raw(json!({"id": "x"}))).id, None);
    }

    #[test]
    fn test_non_object_is_empty_record() {
        let resource = normalize(&RawResource::from_value(json!("nope")));
        assert_eq!(resource.id, None);
        assert_eq!(resource.title, None);
        assert!(!resource.is_free);
        assert_eq!(resource.download_url, None);
    }

    #[test]
    fn test_created_at_parses_rfc3339() {
        let resource = normalize(&raw(json!({"uploaded_at": "2025-01-15T10:00:00Z"})));
        assert_eq!(resource.created_at.as_deref(), Some("2025-01-15T10:00:00Z"));
        assert!(resource.created_at_utc().is_some());
    }

    #[test]
    fn test_normalize_all_accepts_envelope() {
        let listing = json!({"results": [{"id": 1}, {"id": 2}]});
        assert_eq!(normalize_all(&listing).len(), 2);
        assert!(normalize_all(&json!({"detail": "x"})).is_empty());
        assert_eq!(normalize_all(&json!([{"id": 3}])).len(), 1);
    }

    #[test]
    fn test_resolve_file_url() {
        assert_eq!(resolve_file_url("https://x.test/a.pdf"), "https://x.test/a.pdf");
        assert_eq!(
            resolve_file_url("/resources/a.pdf"),
            "https://storage.googleapis.com/elimu-online-resources-2025/resources/a.pdf"
        );
    }
}
