//! Property-based tests for path normalization and route precedence.
//!
//! 1. Normalization is idempotent and never leaves a trailing slash
//! 2. Trailing slashes, query strings and fragments do not change a match
//! 3. Level slugs match exactly when they fit `[a-z0-9-]+`
//! 4. The earlier of two overlapping routes always wins

use elimu_router::{Page, Route, RoutePattern, RouteTable, SLUG_PARAM, app_routes, normalize_path};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn path_strategy() -> impl Strategy<Value = String> {
    "(/[a-zA-Z0-9_.-]{0,8}){0,4}/{0,3}([?#][a-z=&]{0,6})?"
}

fn slug_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,24}"
}

fn app_paths() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "/",
        "/about",
        "/signup",
        "/login",
        "/dashboard",
        "/notes",
        "/ebooks",
        "/exams",
        "/schemes",
        "/lessons",
        "/levels/high-school",
        "/levels/form-4",
        "/missing",
    ])
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalization_is_idempotent(path in path_strategy()) {
        let once = normalize_path(&path);
        prop_assert_eq!(normalize_path(&once), once.clone());
        prop_assert!(once.starts_with('/'));
        prop_assert!(once == "/" || !once.ends_with('/'));
        prop_assert!(!once.contains('?') && !once.contains('#'));
    }

    #[test]
    fn decorations_do_not_change_match(
        path in app_paths(),
        slashes in 0usize..3,
        query in "(\\?[a-z]{1,5}=[a-z0-9]{0,5})?",
        fragment in "(#[a-z]{0,5})?",
    ) {
        let routes = app_routes().unwrap();
        let decorated = format!("{path}{}{query}{fragment}", "/".repeat(slashes));

        let plain = routes.match_path(path).map(|hit| (hit.route.name().to_string(), hit.params));
        let fancy = routes.match_path(&decorated).map(|hit| (hit.route.name().to_string(), hit.params));
        prop_assert_eq!(plain, fancy);
    }

    #[test]
    fn lowercase_slugs_match(slug in slug_strategy()) {
        let routes = app_routes().unwrap();
        let hit = routes.match_path(&format!("/levels/{slug}"));
        prop_assert!(hit.is_some());
        let hit = hit.unwrap();
        prop_assert_eq!(*hit.route.target(), Page::LevelResources);
        prop_assert_eq!(hit.params.get(SLUG_PARAM), Some(slug.as_str()));
    }

    #[test]
    fn slugs_outside_class_never_match(
        head in "[a-z0-9-]{0,6}",
        bad in "[A-Z_.~!]",
        tail in "[a-z0-9-]{0,6}",
    ) {
        let routes = app_routes().unwrap();
        let path = format!("/levels/{head}{bad}{tail}");
        prop_assert!(routes.match_path(&path).is_none());
    }

    #[test]
    fn earlier_route_wins(slug in slug_strategy()) {
        let fixed = || Route::new("fixed", RoutePattern::exact(format!("/levels/{slug}")), 1u8);
        let dynamic = || Route::new("dynamic", RoutePattern::segment("/levels", SLUG_PARAM), 2u8);
        let path = format!("/levels/{slug}");

        let table = RouteTable::new(vec![fixed(), dynamic()]).unwrap();
        prop_assert_eq!(table.match_path(&path).map(|hit| *hit.route.target()), Some(1));

        let table = RouteTable::new(vec![dynamic(), fixed()]).unwrap();
        prop_assert_eq!(table.match_path(&path).map(|hit| *hit.route.target()), Some(2));
    }
}
