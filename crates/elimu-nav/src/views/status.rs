//! Fixed views for misses, failures and pending data.

use crate::view::{Element, VIEW_ATTR, el};

/// Shown when no route matches.
#[must_use]
pub fn not_found() -> Element {
    el("div")
        .class("p-8 text-center")
        .attr(VIEW_ATTR, "not-found")
        .child(
            el("h1")
                .class("text-3xl font-bold text-red-600")
                .text("404 - Page Not Found"),
        )
        .child(
            el("p")
                .class("text-gray-600 mt-2")
                .text("The page you're looking for doesn't exist."),
        )
}

/// Shown when a view fails to build.
#[must_use]
pub fn render_error() -> Element {
    el("div")
        .class("p-8 text-center")
        .attr(VIEW_ATTR, "error")
        .child(
            el("h1")
                .class("text-2xl font-bold text-red-600")
                .text("Something went wrong"),
        )
        .child(el("p").class("text-gray-600 mt-2").text("Please try again."))
}

/// Placeholder while a listing loads.
#[must_use]
pub fn loading() -> Element {
    el("div")
        .class("flex justify-center items-center py-10 text-gray-500")
        .attr("role", "status")
        .text("Loading resources...")
}

/// Error banner for a failed backend call.
#[must_use]
pub fn error_banner(message: &str) -> Element {
    el("div")
        .class("bg-white rounded-xl border border-red-200 p-6 text-red-600")
        .attr("role", "alert")
        .child(el("p").text("Failed to load resources. Please try again later."))
        .child(el("p").class("text-sm mt-1").text(message))
}

/// Notice for an empty listing.
#[must_use]
pub fn empty(message: impl Into<String>) -> Element {
    el("div")
        .class("bg-white rounded-xl border border-gray-200 p-10 text-center text-gray-500")
        .text(message)
}
