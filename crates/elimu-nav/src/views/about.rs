//! About page.

use crate::view::{Element, VIEW_ATTR, el};

/// Static description of the platform.
#[must_use]
pub fn about() -> Element {
    el("section")
        .class("min-h-screen bg-gray-100 p-10 text-center")
        .attr(VIEW_ATTR, "about")
        .child(
            el("h1")
                .class("text-3xl font-bold text-[#5624d0] mb-4")
                .text("About Elimu-Online"),
        )
        .child(el("p").class("text-gray-700 max-w-xl mx-auto").text(
            "Elimu-Online is a modern e-learning platform built for high school students to \
             access verified KCSE resources. From detailed notes to past exam papers and digital \
             e-books, we are committed to enhancing academic excellence through accessible \
             digital tools.",
        ))
}
