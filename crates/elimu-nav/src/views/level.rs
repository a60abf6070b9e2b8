//! Listing for one school level, reached through `/levels/:slug`.

use std::sync::Arc;

use elimu_api::{ApiError, CancellationToken, ResourceSource};
use elimu_model::{LevelSlug, group_for_level};
use elimu_router::{Params, SLUG_PARAM};
use futures_util::FutureExt;

use super::card::resource_card;
use super::{CONTENT_SLOT, View, ViewContext, status};
use crate::error::{RenderError, Result};
use crate::view::{SLOT_ATTR, VIEW_ATTR, ViewNode, el};

/// Level page skeleton plus the deferred listing.
///
/// Unknown slugs still render, titled `Unknown Level`, and list nothing.
pub fn level_resources(
    params: &Params,
    ctx: &ViewContext,
    cancel: &CancellationToken,
) -> Result<View> {
    let slug = params
        .get(SLUG_PARAM)
        .ok_or(RenderError::MissingParam(SLUG_PARAM))?;
    let label = LevelSlug::display_for(slug);
    tracing::debug!("Level page {} ({})", slug, label);

    let skeleton = el("section")
        .class("min-h-screen bg-gray-50 py-10 px-4 sm:px-6 lg:px-8")
        .attr(VIEW_ATTR, "level-resources")
        .attr("data-level", slug)
        .child(
            el("div")
                .class("max-w-7xl mx-auto")
                .child(
                    el("div").class("mb-6").child(
                        el("button")
                            .class("text-sm text-gray-600 hover:text-gray-900")
                            .attr("data-action", "back")
                            .text("\u{2190} Back"),
                    ),
                )
                .child(
                    el("h1")
                        .class("text-3xl sm:text-4xl font-extrabold text-[#5624d0] mb-1")
                        .text(label),
                )
                .child(
                    el("p")
                        .class("text-gray-600 mb-8")
                        .text(format!("All resources for {label}")),
                )
                .child(
                    el("div")
                        .id("content")
                        .attr(SLOT_ATTR, CONTENT_SLOT)
                        .child(status::loading()),
                ),
        );

    let source = Arc::clone(ctx.resources());
    let cancel = cancel.clone();
    let load = level_listing(source, label, cancel).boxed();

    Ok(View::deferred(skeleton, load))
}

async fn level_listing(
    source: Arc<dyn ResourceSource>,
    label: &'static str,
    cancel: CancellationToken,
) -> Result<ViewNode> {
    let resources = match source.list_resources(&cancel).await {
        Ok(resources) => resources,
        Err(ApiError::Cancelled) => return Err(ApiError::Cancelled.into()),
        Err(err) => {
            tracing::error!("Failed to load resources for {}: {}", label, err);
            return Ok(status::error_banner(err.user_message()).into());
        }
    };

    let groups = group_for_level(&resources, label);
    if groups.is_empty() {
        return Ok(status::empty(format!("No resources found for {label}.")).into());
    }

    Ok(el("div")
        .children(groups.iter().map(|group| {
            el("section")
                .class("mb-10")
                .attr("data-group", group.name.clone())
                .child(
                    el("h2")
                        .class("text-2xl font-semibold text-gray-800 mb-4")
                        .text(group.name.clone()),
                )
                .child(
                    el("div")
                        .class("grid gap-4 grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4")
                        .children(group.resources.iter().copied().map(resource_card)),
                )
        }))
        .into())
}
