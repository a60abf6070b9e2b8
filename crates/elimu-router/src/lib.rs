//! Client-side routing for the Elimu Online storefront.
//!
//! Paths are normalized (query, fragment and trailing slashes dropped) and
//! then matched against an ordered [`RouteTable`]. Two pattern kinds exist:
//!
//! - [`RoutePattern::Static`] matches one exact path such as `/about`
//! - [`RoutePattern::Dynamic`] matches `prefix/<segment>` where the segment
//!   is lowercase letters, digits and hyphens
//!
//! The first route that matches wins. A miss is an ordinary `None`, which the
//! navigation layer turns into its "not found" view.
//!
//! ```
//! use elimu_router::{Page, app_routes};
//!
//! let routes = app_routes().unwrap();
//! let hit = routes.match_path("/levels/high-school/").unwrap();
//! assert_eq!(*hit.route.target(), Page::LevelResources);
//! assert_eq!(hit.params.get("slug"), Some("high-school"));
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod error;
pub mod path;
pub mod pattern;
pub mod table;

pub use app::{Page, SECTION_PARAM, SLUG_PARAM, app_routes};
pub use error::{Result, RouterError};
pub use path::{is_normalized, normalize_path};
pub use pattern::{Params, RoutePattern};
pub use table::{Route, RouteMatch, RouteTable};
