//! The storefront's route table.

use std::fmt;

use crate::error::Result;
use crate::pattern::RoutePattern;
use crate::table::{Route, RouteTable};

/// Parameter naming the dashboard section (`notes`, `ebooks`, ...).
pub const SECTION_PARAM: &str = "section";
/// Parameter naming the level slug on `/levels/:slug`.
pub const SLUG_PARAM: &str = "slug";

/// View a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page.
    Home,
    /// About page.
    About,
    /// Account creation form.
    Signup,
    /// Sign-in form.
    Login,
    /// Resource dashboard, optionally focused on one section.
    Dashboard,
    /// Resources for one school level.
    LevelResources,
}

impl Page {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::LevelResources => "level-resources",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard shortcuts in registration order.
const SECTIONS: [&str; 5] = ["notes", "ebooks", "exams", "schemes", "lessons"];

/// Every route the storefront serves, in precedence order.
///
/// The dashboard aliases come after `/dashboard` and before the dynamic
/// level route, matching the order the site has always registered them.
pub fn app_routes() -> Result<RouteTable<Page>> {
    let mut routes = vec![
        Route::new("home", RoutePattern::exact("/"), Page::Home),
        Route::new("about", RoutePattern::exact("/about"), Page::About),
        Route::new("signup", RoutePattern::exact("/signup"), Page::Signup),
        Route::new("login", RoutePattern::exact("/login"), Page::Login),
        Route::new("dashboard", RoutePattern::exact("/dashboard"), Page::Dashboard),
    ];

    routes.extend(SECTIONS.iter().map(|section| {
        Route::new(*section, RoutePattern::exact(format!("/{section}")), Page::Dashboard)
            .with_default(SECTION_PARAM, *section)
    }));

    routes.push(Route::new(
        "level-resources",
        RoutePattern::segment("/levels", SLUG_PARAM),
        Page::LevelResources,
    ));

    RouteTable::new(routes)
}
