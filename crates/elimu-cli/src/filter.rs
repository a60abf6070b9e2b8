//! Resource selection for `elimu resources`.

use anyhow::{Context, Result};
use elimu_model::{LevelSlug, NormalizedResource, Section, group_for_level, group_for_section};

/// Which resources to list.
///
/// A section selects what its dashboard page shows and a level selects what
/// its level page shows; both together keep the intersection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Dashboard section, e.g. `notes`.
    pub section: Option<Section>,
    /// Level hub, e.g. `high-school`.
    pub level: Option<LevelSlug>,
    /// Only free resources.
    pub free_only: bool,
    /// Case-insensitive title fragment.
    pub search: Option<String>,
}

impl ResourceFilter {
    /// Build a filter from command line values.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown section name or level slug.
    pub fn parse(
        section: Option<&str>,
        level: Option<&str>,
        free_only: bool,
        search: Option<&str>,
    ) -> Result<Self> {
        let section = section
            .map(|name| Section::from_name(name).with_context(|| format!("unknown section '{name}'")))
            .transpose()?;
        let level = level
            .map(|slug| {
                LevelSlug::from_slug(slug).with_context(|| {
                    let known: Vec<&str> = LevelSlug::all().iter().map(LevelSlug::slug).collect();
                    format!("unknown level '{slug}' (expected one of: {})", known.join(", "))
                })
            })
            .transpose()?;
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        Ok(Self {
            section,
            level,
            free_only,
            search,
        })
    }

    /// Resources that pass the filter, in listing order.
    #[must_use]
    pub fn apply<'a>(&self, resources: &'a [NormalizedResource]) -> Vec<&'a NormalizedResource> {
        let mut selected: Vec<&NormalizedResource> = match (self.section, self.level) {
            (Some(section), _) => group_for_section(resources, section)
                .into_iter()
                .flat_map(|group| group.resources)
                .collect(),
            (None, Some(level)) => group_for_level(resources, level.label())
                .into_iter()
                .flat_map(|group| group.resources)
                .collect(),
            (None, None) => resources.iter().collect(),
        };

        if let (Some(_), Some(level)) = (self.section, self.level) {
            selected.retain(|resource| resource.level.as_deref().map(str::trim) == Some(level.label()));
        }
        if self.free_only {
            selected.retain(|resource| resource.is_free);
        }
        if let Some(search) = &self.search {
            selected.retain(|resource| resource.display_title().to_lowercase().contains(search));
        }
        selected
    }
}
