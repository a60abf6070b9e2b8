//! Navigation controller behaviour against canned resource sources.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use elimu_api::{ApiError, CancellationToken, MemoryAuthStore, ResourceSource};
use elimu_model::{NormalizedResource, normalize_all};
use elimu_nav::{
    ClickTarget, ControllerState, EventOutcome, History, LoadOutcome, MemoryHistory,
    MemoryViewport, NavEvent, NavigateOptions, NavigationController, Resolution, ViewContext,
};
use elimu_router::{Page, Route, RoutePattern, RouteTable, SECTION_PARAM, app_routes};
use serde_json::json;

type Controller = NavigationController<MemoryHistory, MemoryViewport>;

struct CannedSource {
    resources: Vec<NormalizedResource>,
    calls: AtomicUsize,
}

#[async_trait]
impl ResourceSource for CannedSource {
    async fn list_resources(
        &self,
        cancel: &CancellationToken,
    ) -> elimu_api::Result<Vec<NormalizedResource>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        Ok(self.resources.clone())
    }
}

struct FailingSource;

#[async_trait]
impl ResourceSource for FailingSource {
    async fn list_resources(
        &self,
        _cancel: &CancellationToken,
    ) -> elimu_api::Result<Vec<NormalizedResource>> {
        Err(ApiError::from_response(
            503,
            "Service Unavailable",
            String::new(),
        ))
    }
}

fn catalog() -> Vec<NormalizedResource> {
    normalize_all(&json!([
        {
            "id": 1,
            "title": "Form 4 Biology Notes",
            "category": "NOTES",
            "category_display": "Notes",
            "level_display": "High School",
            "term_display": "Term 1",
            "file_url": "bio.pdf",
            "is_free": true
        },
        {
            "id": 2,
            "title": "Chemistry Notes",
            "category_display": "Notes",
            "level_display": "Junior High School",
            "file_url": "chem.pdf",
            "price": "50.00"
        },
        {
            "id": 3,
            "title": "KCSE Mock Exam",
            "category_display": "Exams",
            "level_display": "High School",
            "term_display": "Term 2",
            "file_url": "mock.pdf",
            "price": 125
        }
    ]))
}

fn controller_with(source: Arc<dyn ResourceSource>, routes: RouteTable<Page>, start: &str) -> Controller {
    let context = ViewContext::new(source, Arc::new(MemoryAuthStore::new()));
    NavigationController::new(
        routes,
        context,
        MemoryHistory::new(start),
        MemoryViewport::new(),
    )
    .with_origin("http://localhost:5173")
}

fn controller(start: &str) -> Controller {
    let source = Arc::new(CannedSource {
        resources: catalog(),
        calls: AtomicUsize::new(0),
    });
    controller_with(source, app_routes().unwrap(), start)
}

fn count_views(nav: &Controller, view: &str) -> usize {
    nav.mount()
        .content()
        .map_or(0, |node| node.find_by_attr("data-view", view).len())
}

fn mounted_text(nav: &Controller) -> String {
    nav.mount()
        .content()
        .map(|node| node.text_content())
        .unwrap_or_default()
}

#[test]
fn test_start_renders_current_location() {
    let mut nav = controller("/");
    assert_eq!(nav.phase(), ControllerState::Uninitialized);

    assert_eq!(nav.start(), Resolution::Matched(Page::Home));
    assert!(nav.state().initialized);
    assert_eq!(nav.phase(), ControllerState::Idle);
    assert_eq!(nav.state().current_path, "/");
    assert_eq!(count_views(&nav, "home"), 1);
    assert_eq!(nav.viewport().resets(), 1);
}

#[test]
fn test_start_is_idempotent() {
    let mut nav = controller("/about");
    nav.start();
    nav.start();

    assert!(nav.state().initialized);
    assert_eq!(nav.phase(), ControllerState::Idle);
    assert_eq!(nav.generation(), 2);
    assert_eq!(count_views(&nav, "about"), 1);
}

#[test]
fn test_consecutive_navigations_leave_only_last_view() {
    let mut nav = controller("/");
    nav.start();

    nav.navigate("/about", NavigateOptions::push());
    nav.navigate("/login", NavigateOptions::push());

    assert_eq!(nav.state().current_path, "/login");
    assert_eq!(count_views(&nav, "login"), 1);
    assert_eq!(count_views(&nav, "about"), 0);
    assert_eq!(count_views(&nav, "home"), 0);
    assert_eq!(nav.history().entries(), ["/", "/about", "/login"]);
}

#[test]
fn test_unmatched_path_renders_one_not_found() {
    let mut nav = controller("/");
    nav.start();

    let resolution = nav.navigate("/does/not/exist", NavigateOptions::push());
    assert_eq!(resolution, Some(Resolution::NotFound));
    assert_eq!(count_views(&nav, "not-found"), 1);
    assert!(mounted_text(&nav).contains("404 - Page Not Found"));

    nav.navigate("/levels/High_School", NavigateOptions::push());
    assert_eq!(count_views(&nav, "not-found"), 1);
    assert_eq!(nav.phase(), ControllerState::Idle);
}

#[test]
fn test_render_failure_mounts_error_view() {
    let routes = RouteTable::new(vec![
        Route::new("broken", RoutePattern::exact("/broken"), Page::Dashboard)
            .with_default(SECTION_PARAM, "bogus"),
    ])
    .unwrap();
    let source = Arc::new(CannedSource {
        resources: Vec::new(),
        calls: AtomicUsize::new(0),
    });
    let mut nav = controller_with(source, routes, "/broken");

    assert_eq!(nav.start(), Resolution::Failed);
    assert_eq!(count_views(&nav, "error"), 1);
    assert!(mounted_text(&nav).contains("Something went wrong"));
    assert!(!nav.has_pending());
}

#[test]
fn test_location_is_normalized() {
    let mut nav = controller("/");
    nav.start();

    nav.navigate("http://localhost:5173/about/?ref=nav#team", NavigateOptions::push());
    assert_eq!(nav.state().current_path, "/about");
    assert_eq!(nav.history().location(), "/about/?ref=nav#team");
    assert_eq!(count_views(&nav, "about"), 1);
}

#[test]
fn test_replace_keeps_history_length() {
    let mut nav = controller("/login");
    nav.start();

    nav.navigate("/dashboard", NavigateOptions::replace());
    assert_eq!(nav.history().entries(), ["/dashboard"]);
    assert_eq!(nav.state().current_path, "/dashboard");
}

#[test]
fn test_blank_navigation_is_ignored() {
    let mut nav = controller("/about");
    nav.start();

    assert_eq!(nav.navigate("  ", NavigateOptions::push()), None);
    assert_eq!(nav.generation(), 1);
    assert_eq!(nav.history().len(), 1);
}

#[test]
fn test_popstate_renders_history_location() {
    let mut nav = controller("/");
    nav.start();
    nav.navigate("/about", NavigateOptions::push());
    nav.navigate("/signup", NavigateOptions::push());

    assert!(nav.history_mut().back());
    assert_eq!(nav.handle_event(NavEvent::PopState), EventOutcome::Handled);

    assert_eq!(nav.state().current_path, "/about");
    assert_eq!(count_views(&nav, "about"), 1);
    assert_eq!(count_views(&nav, "signup"), 0);
}

#[test]
fn test_click_interception() {
    let mut nav = controller("/");
    nav.start();

    let outcome = nav.handle_event(NavEvent::Click(ClickTarget::nav_link("/levels/junior-high")));
    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(nav.state().current_path, "/levels/junior-high");

    for target in [
        ClickTarget::plain_link("/about"),
        ClickTarget::nav_link("/about").with_target("_blank"),
        ClickTarget::nav_link("/notes.pdf").with_download(),
        ClickTarget::nav_link("https://example.com/about"),
    ] {
        assert_eq!(nav.handle_event(NavEvent::Click(target)), EventOutcome::Ignored);
    }
    assert_eq!(nav.state().current_path, "/levels/junior-high");
}

#[test]
fn test_events_before_start_are_ignored() {
    let mut nav = controller("/");

    assert_eq!(nav.handle_event(NavEvent::PopState), EventOutcome::Ignored);
    assert_eq!(
        nav.handle_event(NavEvent::Click(ClickTarget::nav_link("/about"))),
        EventOutcome::Ignored
    );
    assert_eq!(nav.generation(), 0);
    assert!(nav.mount().content().is_none());
}

#[test]
fn test_scroll_resets_on_every_render() {
    let mut nav = controller("/");
    nav.start();
    nav.navigate("/about", NavigateOptions::push());
    nav.navigate("/missing", NavigateOptions::push());
    assert_eq!(nav.viewport().resets(), 3);
}

#[tokio::test]
async fn test_section_renders_in_two_passes() {
    let mut nav = controller("/");
    nav.start();
    nav.navigate("/notes", NavigateOptions::push());

    assert!(nav.has_pending());
    assert!(mounted_text(&nav).contains("Loading resources..."));

    assert_eq!(nav.settle().await, Some(LoadOutcome::Applied));
    let text = mounted_text(&nav);
    assert!(!text.contains("Loading resources..."));
    assert!(text.contains("High School Notes"));
    assert!(text.contains("Junior High School Notes"));
    assert!(text.contains("Form 4 Biology Notes"));
    assert!(text.contains("Unlock (Ksh 50)"));
    assert!(!text.contains("KCSE Mock Exam"));

    assert_eq!(nav.settle().await, None);
}

#[tokio::test]
async fn test_dashboard_without_section_has_no_load() {
    let mut nav = controller("/dashboard");
    nav.start();
    assert!(!nav.has_pending());
    assert!(mounted_text(&nav).contains("Select a category"));
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let mut nav = controller("/");
    nav.start();

    nav.navigate("/notes", NavigateOptions::push());
    let first = nav.take_pending().unwrap();
    let first_generation = first.generation();

    nav.navigate("/exams", NavigateOptions::push());
    assert!(nav.generation() > first_generation);

    let outcome = nav.apply(first.finish().await);
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(!mounted_text(&nav).contains("Form 4 Biology Notes"));

    assert_eq!(nav.settle().await, Some(LoadOutcome::Applied));
    let text = mounted_text(&nav);
    assert!(text.contains("Term 2 Exams"));
    assert!(text.contains("KCSE Mock Exam"));
    assert!(!text.contains("Form 4 Biology Notes"));
}

#[tokio::test]
async fn test_level_page_groups_by_category() {
    let mut nav = controller("/levels/high-school");
    assert_eq!(nav.start(), Resolution::Matched(Page::LevelResources));
    assert!(mounted_text(&nav).contains("All resources for High School"));

    assert_eq!(nav.settle().await, Some(LoadOutcome::Applied));
    let content = nav.mount().content().unwrap();
    let groups: Vec<&str> = content
        .elements()
        .into_iter()
        .filter_map(|element| element.get_attr("data-group"))
        .collect();
    assert_eq!(groups, ["Notes", "Exams"]);
    assert!(!mounted_text(&nav).contains("Chemistry Notes"));
}

#[tokio::test]
async fn test_unknown_level_lists_nothing() {
    let mut nav = controller("/levels/university");
    nav.start();
    nav.settle().await;

    let text = mounted_text(&nav);
    assert!(text.contains("Unknown Level"));
    assert!(text.contains("No resources found for Unknown Level."));
}

#[tokio::test]
async fn test_backend_failure_shows_banner() {
    let mut nav = controller_with(Arc::new(FailingSource), app_routes().unwrap(), "/exams");
    nav.start();

    assert_eq!(nav.settle().await, Some(LoadOutcome::Applied));
    let text = mounted_text(&nav);
    assert!(text.contains("Failed to load resources. Please try again later."));
    assert_eq!(nav.phase(), ControllerState::Idle);
}
