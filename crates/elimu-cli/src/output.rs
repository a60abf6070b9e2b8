//! Terminal tables.

use std::fmt;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use elimu_model::NormalizedResource;
use elimu_nav::resolve_location;
use elimu_router::{Page, RouteTable, normalize_path};

use crate::settings::{SettingKey, Settings};

/// Shared look for every table the CLI prints.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Route table in match order.
#[must_use]
pub fn routes_table(routes: &RouteTable<Page>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Pattern"),
        header_cell("Page"),
        header_cell("Defaults"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (index, route) in routes.iter().enumerate() {
        let defaults = if route.defaults().is_empty() {
            String::new()
        } else {
            route.defaults().to_string()
        };
        table.add_row(vec![
            (index + 1).to_string(),
            route.name().to_string(),
            route.pattern().to_string(),
            route.target().to_string(),
            defaults,
        ]);
    }
    table
}

/// Resource listing with price and availability.
#[must_use]
pub fn resources_table(resources: &[&NormalizedResource]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Category"),
        header_cell("Level"),
        header_cell("Term"),
        header_cell("Price"),
        header_cell("Added"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for resource in resources {
        let price = if resource.is_free {
            Cell::new(resource.price_label()).fg(Color::Green)
        } else {
            Cell::new(resource.price_label()).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(resource.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(resource.display_title()),
            Cell::new(resource.category.as_deref().unwrap_or_default()),
            Cell::new(resource.level.as_deref().unwrap_or_default()),
            Cell::new(resource.term.as_deref().unwrap_or_default()),
            price,
            Cell::new(
                resource
                    .created_at_utc()
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }
    table
}

/// Current settings, one row per key, plus the resolved backend.
#[must_use]
pub fn settings_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);

    for key in SettingKey::all() {
        table.add_row(vec![key.to_string(), settings.get(*key)]);
    }
    table.add_row(vec![
        Cell::new("backend").add_attribute(Attribute::Italic),
        Cell::new(settings.api_config().base_url()).add_attribute(Attribute::Italic),
    ]);
    table
}

/// Where one input resolved, as printed by `elimu resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionLine {
    pub text: String,
    pub matched: bool,
}

impl fmt::Display for ResolutionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Describe where `input` resolves.
///
/// `input` may be a path or a full URL; URLs on `origin` lose their origin.
#[must_use]
pub fn resolution_line(routes: &RouteTable<Page>, input: &str, origin: &str) -> ResolutionLine {
    let path = normalize_path(&resolve_location(input, origin));
    let Some(hit) = routes.match_path(&path) else {
        return ResolutionLine {
            text: format!("{input} -> not found ({path})"),
            matched: false,
        };
    };
    let text = if hit.params.is_empty() {
        format!("{input} -> {} ({})", hit.route.name(), hit.route.target())
    } else {
        format!(
            "{input} -> {} ({}) {}",
            hit.route.name(),
            hit.route.target(),
            hit.params
        )
    };
    ResolutionLine { text, matched: true }
}

#[cfg(test)]
mod tests {
    use elimu_model::normalize_all;
    use elimu_router::app_routes;
    use serde_json::json;

    use super::*;

    fn plain(mut table: Table) -> String {
        table.force_no_tty();
        table.to_string()
    }

    #[test]
    fn test_routes_table_lists_every_route() {
        let routes = app_routes().unwrap();
        let table = routes_table(&routes);
        assert_eq!(table.row_iter().count(), routes.len());

        let rendered = plain(table);
        assert!(rendered.contains("/levels/:slug"));
        assert!(rendered.contains("section=notes"));
        assert!(rendered.contains("dashboard"));
    }

    #[test]
    fn test_resolution_lines() {
        let routes = app_routes().unwrap();
        let lines: Vec<String> = [
            "/",
            "http://localhost:5173/about/",
            "/notes/?page=2",
            "/levels/high-school",
            "/levels/High",
        ]
        .iter()
        .map(|input| resolution_line(&routes, input, "http://localhost:5173").text)
        .collect();

        insta::assert_snapshot!(lines.join("\n"), @r"
        / -> home (home)
        http://localhost:5173/about/ -> about (about)
        /notes/?page=2 -> notes (dashboard) {section=notes}
        /levels/high-school -> level-resources (level-resources) {slug=high-school}
        /levels/High -> not found (/levels/High)
        ");
    }

    #[test]
    fn test_unmatched_path_is_flagged() {
        let routes = app_routes().unwrap();
        assert!(resolution_line(&routes, "/about", "http://localhost:5173").matched);

        let missing = resolution_line(&routes, "/levels/High", "http://localhost:5173");
        assert!(!missing.matched);
        assert_eq!(missing.to_string(), "/levels/High -> not found (/levels/High)");
    }

    #[test]
    fn test_resources_table() {
        let resources = normalize_all(&json!([
            {"id": 7, "title": "KCSE Maths", "price": "125.00",
             "created_at": "2025-03-04T08:30:00Z"},
            {"id": 8, "title": "Free Notes", "is_free": true}
        ]));
        let refs: Vec<&NormalizedResource> = resources.iter().collect();
        let rendered = plain(resources_table(&refs));

        assert!(rendered.contains("KCSE Maths"));
        assert!(rendered.contains("Ksh 125"));
        assert!(rendered.contains("2025-03-04"));
        assert!(rendered.contains("Free"));
    }

    #[test]
    fn test_settings_table_shows_backend() {
        let rendered = plain(settings_table(&Settings::default()));
        assert!(rendered.contains("production-url"));
        assert!(rendered.contains("backend"));
        assert!(rendered.contains("run.app/api"));
    }
}
