//! Landing page: hero, selling points, how it works and the level hub.

use elimu_model::LevelSlug;

use crate::view::{Element, NAV_ATTR, VIEW_ATTR, el, nav_link};

const FEATURES: [(&str, &str); 3] = [
    (
        "KCSE-Aligned Content",
        "Every resource is crafted with the national curriculum in mind.",
    ),
    (
        "Trusted by Educators",
        "Used by teachers and schools to improve academic outcomes.",
    ),
    (
        "Always Up to Date",
        "Content is refreshed every term with timely topics and exams.",
    ),
];

const STEPS: [(&str, &str); 4] = [
    (
        "1. Sign Up",
        "Create your account and join the learning community.",
    ),
    (
        "2. Browse Resources",
        "Explore notes, exams, lesson plans, and more by category.",
    ),
    (
        "3. View or Download",
        "Instantly access resources or save them offline.",
    ),
    (
        "4. Stay Ahead",
        "Learn with ease and stay updated with new content every term.",
    ),
];

/// Grade ranges shown under each level card.
fn level_subtitle(level: LevelSlug) -> &'static str {
    match level {
        LevelSlug::LowerPrimary => "PP1 - Grade 3",
        LevelSlug::UpperPrimary => "Grade 4 - 6",
        LevelSlug::JuniorHigh => "Grade 7 - 9",
        LevelSlug::HighSchool => "Form 1 - 4",
    }
}

/// The landing page.
#[must_use]
pub fn home() -> Element {
    el("section")
        .class("bg-gray-50")
        .attr(VIEW_ATTR, "home")
        .child(hero())
        .child(why_choose())
        .child(how_it_works())
        .child(levels_grid())
}

fn hero() -> Element {
    el("div")
        .class("bg-[#5624d0] text-white py-20 px-6 text-center")
        .child(
            el("h1")
                .class("text-4xl md:text-5xl font-extrabold mb-4")
                .text("Elimu Online"),
        )
        .child(
            el("p")
                .class("text-lg max-w-2xl mx-auto mb-8")
                .text("Notes, exams, e-books, schemes of work and lesson plans for Kenyan learners."),
        )
        .child(
            nav_link("/dashboard", "Browse Resources")
                .class("inline-block bg-white text-[#5624d0] font-semibold px-6 py-3 rounded"),
        )
}

fn why_choose() -> Element {
    el("div")
        .class("bg-[#F4FFF6] py-16 px-6")
        .child(
            el("h2")
                .class("text-3xl md:text-4xl font-bold text-[#1E293B] mb-4 text-center")
                .text("Why Choose Elimu_Online?"),
        )
        .child(
            el("div")
                .class("grid grid-cols-1 md:grid-cols-3 gap-8 max-w-6xl mx-auto")
                .children(FEATURES.iter().map(|(title, body)| {
                    el("div")
                        .class("bg-white rounded-lg shadow p-6")
                        .child(el("h3").class("text-xl font-semibold text-[#10B981] mb-2").text(*title))
                        .child(el("p").class("text-sm text-gray-600").text(*body))
                })),
        )
}

fn how_it_works() -> Element {
    el("div")
        .class("bg-white py-16 px-6 text-center")
        .child(
            el("h2")
                .class("text-3xl md:text-4xl font-bold text-[#1E293B] mb-6")
                .text("How It Works"),
        )
        .child(
            el("div")
                .class("grid grid-cols-1 md:grid-cols-4 gap-6 max-w-6xl mx-auto")
                .children(STEPS.iter().map(|(title, body)| {
                    el("div")
                        .class("bg-[#F4FFF6] p-6 rounded-lg shadow")
                        .child(el("h3").class("font-semibold text-lg text-[#1E293B]").text(*title))
                        .child(el("p").class("text-sm text-gray-600 mt-2").text(*body))
                })),
        )
}

fn levels_grid() -> Element {
    el("div")
        .class("bg-gray-50 py-12 px-4")
        .child(
            el("h2")
                .class("text-3xl sm:text-4xl font-extrabold text-gray-900 text-center")
                .text("Browse by Education Level"),
        )
        .child(
            el("p").class("text-gray-600 mt-2 mb-8 text-center").text(
                "Pick a level to view all notes, e-books, exams, schemes and lesson plans.",
            ),
        )
        .child(
            el("div")
                .class("grid gap-6 sm:grid-cols-2 lg:grid-cols-4 max-w-7xl mx-auto")
                .id("levels-grid")
                .children(LevelSlug::all().iter().map(|level| {
                    el("a")
                        .class("block rounded-2xl border border-gray-200 p-6 hover:shadow-lg")
                        .attr("href", format!("/levels/{}", level.slug()))
                        .attr(NAV_ATTR, "true")
                        .child(el("h3").class("text-xl font-bold text-gray-900").text(level.label()))
                        .child(el("p").class("text-gray-600 mt-1").text(level_subtitle(*level)))
                })),
        )
}
