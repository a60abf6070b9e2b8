//! Resource dashboard, optionally focused on one section.

use std::sync::Arc;

use elimu_api::{ApiError, CancellationToken, ResourceSource};
use elimu_model::{ResourceGroup, Section, group_for_section};
use elimu_router::{Params, SECTION_PARAM};
use futures_util::FutureExt;

use super::card::resource_card;
use super::{CONTENT_SLOT, View, ViewContext, status};
use crate::error::Result;
use crate::view::{Element, SLOT_ATTR, VIEW_ATTR, ViewNode, el, nav_link};

const LINK_CLASS: &str = "hover:bg-[#374151] px-3 py-2 rounded text-left";

/// Dashboard with a section sidebar.
///
/// Without a `section` parameter the content area asks the user to pick a
/// category. With one, the content area starts as a loading placeholder and a
/// deferred load replaces it with the grouped listing.
pub fn dashboard(params: &Params, ctx: &ViewContext, cancel: &CancellationToken) -> Result<View> {
    let section = params
        .get(SECTION_PARAM)
        .map(Section::from_name)
        .transpose()?;

    let content = el("main")
        .id("dashboard-content")
        .class("flex-1 ml-0 md:ml-64 pt-2 px-2 md:px-4 bg-gray-50 min-h-screen")
        .attr(SLOT_ATTR, CONTENT_SLOT);

    let Some(section) = section else {
        let content = content.child(
            el("h3")
                .class("text-xl font-semibold mt-0 mb-4")
                .text("Select a category"),
        );
        return Ok(View::ready(layout(None, content)));
    };

    tracing::debug!("Dashboard section {}", section.name());
    let source = Arc::clone(ctx.resources());
    let cancel = cancel.clone();
    let load = section_listing(source, section, cancel).boxed();

    Ok(View::deferred(
        layout(Some(section), content.child(status::loading())),
        load,
    ))
}

fn layout(active: Option<Section>, content: Element) -> Element {
    let mut root = el("section")
        .class("flex min-h-screen")
        .attr(VIEW_ATTR, "dashboard");
    if let Some(section) = active {
        root = root.attr("data-section", section.name());
    }
    root.child(sidebar(active)).child(content)
}

fn sidebar(active: Option<Section>) -> Element {
    el("aside")
        .class("w-64 bg-[#1f2937] text-white shadow-md hidden md:flex flex-col pt-[64px]")
        .child(
            el("h2")
                .class("text-lg font-bold text-center mb-6")
                .text("High School Resources"),
        )
        .child(
            el("nav")
                .class("flex flex-col px-4 gap-3 text-sm font-medium")
                .children(Section::all().iter().map(|section| {
                    let link = nav_link(format!("/{}", section.name()), section.heading())
                        .class(LINK_CLASS);
                    if active == Some(*section) {
                        link.attr("aria-current", "page")
                    } else {
                        link
                    }
                })),
        )
}

/// Second pass: fetch, filter and group the section's resources.
async fn section_listing(
    source: Arc<dyn ResourceSource>,
    section: Section,
    cancel: CancellationToken,
) -> Result<ViewNode> {
    let heading = el("h2")
        .class("text-2xl font-bold text-[#5624d0] mb-4")
        .text(section.heading());

    let resources = match source.list_resources(&cancel).await {
        Ok(resources) => resources,
        Err(ApiError::Cancelled) => return Err(ApiError::Cancelled.into()),
        Err(err) => {
            tracing::error!("Failed to load {} resources: {}", section.name(), err);
            return Ok(el("div")
                .child(heading)
                .child(status::error_banner(err.user_message()))
                .into());
        }
    };

    let groups = group_for_section(&resources, section);
    tracing::debug!(
        "{} of {} resources in {} ({} groups)",
        groups.iter().map(|group| group.resources.len()).sum::<usize>(),
        resources.len(),
        section.heading(),
        groups.len()
    );

    if groups.is_empty() {
        return Ok(el("div")
            .child(heading)
            .child(el("p").class("text-gray-500").text("No resources found yet."))
            .into());
    }

    Ok(el("div")
        .child(heading)
        .children(groups.iter().map(|group| group_block(group, section)))
        .into())
}

fn group_block(group: &ResourceGroup<'_>, section: Section) -> Element {
    el("div")
        .class("mb-6")
        .attr("data-group", group.name.clone())
        .child(
            el("h4")
                .class("text-xl font-semibold text-gray-700 mb-2")
                .text(format!("{} {}", group.name, section.heading())),
        )
        .child(
            el("div")
                .class("grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4")
                .children(group.resources.iter().copied().map(resource_card)),
        )
}
