//! Integration tests for resource listing and route inspection.

use elimu_cli::filter::ResourceFilter;
use elimu_cli::output::{resolution_line, resources_table};
use elimu_model::{NormalizedResource, normalize_all};
use elimu_router::app_routes;
use serde_json::json;

const ORIGIN: &str = "http://localhost:5173";

fn backend_listing() -> Vec<NormalizedResource> {
    normalize_all(&json!({
        "results": [
            {"id": 11, "title": "Grade 9 Maths Notes", "category": "NOTES",
             "level": "GRADE9", "is_free": "yes", "file_url": "g9/maths.pdf"},
            {"id": 12, "title": "Form 4 Chemistry Notes", "category_display": "Notes",
             "level_display": "High School", "price": "80.00"},
            {"id": 13, "title": "Term 1 Exam", "category_display": "Exams",
             "level_display": "High School", "term_display": "Term 1", "price": 125}
        ]
    }))
}

#[test]
fn test_section_listing_matches_dashboard_filter() {
    let resources = backend_listing();
    let filter = ResourceFilter::parse(Some("notes"), None, false, None).unwrap();
    let selected = filter.apply(&resources);

    let titles: Vec<&str> = selected.iter().map(|r| r.display_title()).collect();
    assert_eq!(titles, ["Grade 9 Maths Notes", "Form 4 Chemistry Notes"]);
}

#[test]
fn test_free_listing_renders_table() {
    let resources = backend_listing();
    let filter = ResourceFilter::parse(None, None, true, None).unwrap();
    let selected = filter.apply(&resources);
    assert_eq!(selected.len(), 1);

    let mut table = resources_table(&selected);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("Grade 9 Maths Notes"));
    assert!(rendered.contains("Free"));
    assert!(!rendered.contains("Term 1 Exam"));
}

#[test]
fn test_every_section_resolves_to_the_dashboard() {
    let routes = app_routes().unwrap();
    for section in ["notes", "ebooks", "exams", "schemes", "lessons"] {
        let line = resolution_line(&routes, &format!("/{section}/"), ORIGIN);
        assert!(
            line.text.ends_with(&format!("(dashboard) {{section={section}}}")),
            "{line}"
        );
    }
}

#[test]
fn test_foreign_origin_keeps_only_the_path() {
    let routes = app_routes().unwrap();
    let line = resolution_line(&routes, "https://example.com/levels/junior-high", ORIGIN);
    assert!(line.matched);
    assert!(line.text.ends_with("{slug=junior-high}"), "{line}");
}
