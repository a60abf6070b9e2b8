//! Resource cards shared by the dashboard and level pages.

use elimu_model::{NormalizedResource, resolve_file_url};

use crate::view::{Element, el};

/// Card for one resource: title, level/term line, price label and either a
/// preview action (free) or an unlock action (paid).
#[must_use]
pub fn resource_card(resource: &NormalizedResource) -> Element {
    let title = resource.display_title();
    let price_label = resource.price_label();

    let mut card = el("div").class("border p-4 rounded shadow-sm bg-white");
    if let Some(id) = resource.id {
        card = card.attr("data-resource-id", id.to_string());
    }

    let price_class = if resource.is_free {
        "text-xs font-semibold text-green-600"
    } else {
        "text-xs font-semibold text-yellow-700"
    };

    card.child(
        el("h5")
            .class("font-medium truncate")
            .attr("title", title)
            .text(title),
    )
    .child(el("p").class("text-xs text-gray-500 mt-1").text(meta_line(resource)))
    .child(
        el("div")
            .class("mt-3 flex gap-2 items-center")
            .child(el("span").class(price_class).text(price_label.clone()))
            .child(action(resource, &price_label)),
    )
}

fn meta_line(resource: &NormalizedResource) -> String {
    let level = resource.level.as_deref().unwrap_or_default();
    match resource.term.as_deref().filter(|term| !term.is_empty()) {
        Some(term) if level.is_empty() => term.to_string(),
        Some(term) => format!("{level} \u{2022} {term}"),
        None => level.to_string(),
    }
}

fn action(resource: &NormalizedResource, price_label: &str) -> Element {
    let title = resource.display_title();

    if resource.is_free {
        return match resource.best_preview() {
            Some(url) => el("button")
                .class("px-3 py-1 bg-green-600 hover:bg-green-700 text-white rounded text-sm")
                .attr("data-action", "preview")
                .attr("data-title", title)
                .attr("data-preview", resolve_file_url(url))
                .text("Preview"),
            None => el("button")
                .class("px-3 py-1 bg-gray-300 text-gray-600 rounded text-sm")
                .attr("disabled", "disabled")
                .text("Preview not available"),
        };
    }

    let mut button = el("button")
        .class("px-3 py-1 bg-yellow-600 hover:bg-yellow-700 text-white rounded text-sm")
        .attr("data-action", "unlock")
        .attr("data-title", title)
        .attr("data-price", resource.price.to_string());
    if let Some(id) = resource.id {
        button = button.attr("data-resource-id", id.to_string());
    }
    button.text(format!("Unlock ({price_label})"))
}
