//! Catalog vocabulary: categories, levels, terms, dashboard sections and level slugs.
//!
//! The backend stores short codes (`NOTES`, `FORM4`, `T1`) and may or may not
//! send the matching display label. Every `parse` here accepts either form,
//! case-insensitively, so comparisons work no matter which one arrived.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

// =============================================================================
// CATEGORY
// =============================================================================

/// Resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Revision notes.
    Notes,
    /// Past papers and mock exams.
    Exams,
    /// Electronic books.
    #[serde(rename = "EBOOKS")]
    EBooks,
    /// Schemes of work.
    Schemes,
    /// Lesson plans.
    LessonPlans,
}

impl Category {
    /// Backend code for this category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Notes => "NOTES",
            Self::Exams => "EXAMS",
            Self::EBooks => "EBOOKS",
            Self::Schemes => "SCHEMES",
            Self::LessonPlans => "LESSON_PLANS",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Exams => "Exams",
            Self::EBooks => "E-Books",
            Self::Schemes => "Schemes of Work",
            Self::LessonPlans => "Lesson Plans",
        }
    }

    /// All categories in backend declaration order.
    pub const fn all() -> &'static [Category] {
        &[
            Self::Notes,
            Self::Exams,
            Self::EBooks,
            Self::Schemes,
            Self::LessonPlans,
        ]
    }

    /// Order in which level pages list categories.
    pub const fn listing_order() -> &'static [Category] {
        &[
            Self::Notes,
            Self::EBooks,
            Self::Exams,
            Self::Schemes,
            Self::LessonPlans,
        ]
    }

    /// Parse a code or label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|category| {
            category.code().eq_ignore_ascii_case(value)
                || category.label().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// School level a resource targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Grade 9 (junior school).
    Grade9,
    /// Form 2.
    Form2,
    /// Form 3.
    Form3,
    /// Form 4.
    Form4,
}

impl Level {
    /// Backend code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Grade9 => "GRADE9",
            Self::Form2 => "FORM2",
            Self::Form3 => "FORM3",
            Self::Form4 => "FORM4",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Grade9 => "Grade 9",
            Self::Form2 => "Form 2",
            Self::Form3 => "Form 3",
            Self::Form4 => "Form 4",
        }
    }

    /// All levels.
    pub const fn all() -> &'static [Level] {
        &[Self::Grade9, Self::Form2, Self::Form3, Self::Form4]
    }

    /// Parse a code or label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|level| {
            level.code().eq_ignore_ascii_case(value) || level.label().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TERM
// =============================================================================

/// School term. Required by the backend for exams, schemes and lesson plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Term 1.
    T1,
    /// Term 2.
    T2,
    /// Term 3.
    T3,
}

impl Term {
    /// Backend code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::T1 => "Term 1",
            Self::T2 => "Term 2",
            Self::T3 => "Term 3",
        }
    }

    /// All terms.
    pub const fn all() -> &'static [Term] {
        &[Self::T1, Self::T2, Self::T3]
    }

    /// Parse a code or label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|term| {
            term.code().eq_ignore_ascii_case(value) || term.label().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// DASHBOARD SECTION
// =============================================================================

/// Field a dashboard section groups its resources by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    /// Group by school level.
    Level,
    /// Group by term.
    Term,
}

/// Dashboard section, selected by the `/notes`, `/ebooks`, ... routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `/notes`
    Notes,
    /// `/ebooks`
    Ebooks,
    /// `/exams`
    Exams,
    /// `/schemes`
    Schemes,
    /// `/lessons`
    Lessons,
}

impl Section {
    /// All sections in sidebar order.
    pub const fn all() -> &'static [Section] {
        &[
            Self::Notes,
            Self::Ebooks,
            Self::Exams,
            Self::Schemes,
            Self::Lessons,
        ]
    }

    /// Route-facing name (`notes`, `ebooks`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Ebooks => "ebooks",
            Self::Exams => "exams",
            Self::Schemes => "schemes",
            Self::Lessons => "lessons",
        }
    }

    /// Category this section lists.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Notes => Category::Notes,
            Self::Ebooks => Category::EBooks,
            Self::Exams => Category::Exams,
            Self::Schemes => Category::Schemes,
            Self::Lessons => Category::LessonPlans,
        }
    }

    /// Heading shown above the listing.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        self.category().label()
    }

    /// Notes and e-books are grouped by level, everything else by term.
    #[must_use]
    pub const fn group_field(&self) -> GroupField {
        match self {
            Self::Notes | Self::Ebooks => GroupField::Level,
            Self::Exams | Self::Schemes | Self::Lessons => GroupField::Term,
        }
    }

    /// Parse a route-facing section name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|section| section.name() == name)
            .ok_or_else(|| ModelError::UnknownSection(name.to_string()))
    }
}

// =============================================================================
// LEVEL SLUGS
// =============================================================================

/// Display label used when a level slug is not recognised.
pub const UNKNOWN_LEVEL: &str = "Unknown Level";

/// Level hub entries reachable at `/levels/<slug>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSlug {
    /// `lower-primary`
    LowerPrimary,
    /// `upper-primary`
    UpperPrimary,
    /// `junior-high`
    JuniorHigh,
    /// `high-school`
    HighSchool,
}

impl LevelSlug {
    /// All level hubs in display order.
    pub const fn all() -> &'static [LevelSlug] {
        &[
            Self::LowerPrimary,
            Self::UpperPrimary,
            Self::JuniorHigh,
            Self::HighSchool,
        ]
    }

    /// URL slug.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::LowerPrimary => "lower-primary",
            Self::UpperPrimary => "upper-primary",
            Self::JuniorHigh => "junior-high",
            Self::HighSchool => "high-school",
        }
    }

    /// Display label, also the value resources carry in their `level` field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LowerPrimary => "Lower Primary",
            Self::UpperPrimary => "Upper Primary",
            Self::JuniorHigh => "Junior High School",
            Self::HighSchool => "High School",
        }
    }

    /// Look up a slug exactly.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|level| level.slug() == slug)
    }

    /// Display label for a slug, or [`UNKNOWN_LEVEL`].
    #[must_use]
    pub fn display_for(slug: &str) -> &'static str {
        Self::from_slug(slug).map_or(UNKNOWN_LEVEL, |level| level.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_accepts_code_and_label() {
        assert_eq!(Category::parse("NOTES"), Some(Category::Notes));
        assert_eq!(Category::parse("notes"), Some(Category::Notes));
        assert_eq!(Category::parse("E-Books"), Some(Category::EBooks));
        assert_eq!(Category::parse(" lesson_plans "), Some(Category::LessonPlans));
        assert_eq!(Category::parse("schemes of work"), Some(Category::Schemes));
        assert_eq!(Category::parse("Videos"), None);
    }

    #[test]
    fn test_level_and_term_parse() {
        assert_eq!(Level::parse("FORM4"), Some(Level::Form4));
        assert_eq!(Level::parse("Grade 9"), Some(Level::Grade9));
        assert_eq!(Term::parse("term 2"), Some(Term::T2));
        assert_eq!(Term::parse("T3"), Some(Term::T3));
        assert_eq!(Term::parse("T4"), None);
    }

    #[test]
    fn test_section_mapping() {
        assert_eq!(Section::from_name("ebooks").unwrap().heading(), "E-Books");
        assert_eq!(
            Section::from_name("lessons").unwrap().category(),
            Category::LessonPlans
        );
        assert_eq!(Section::Notes.group_field(), GroupField::Level);
        assert_eq!(Section::Exams.group_field(), GroupField::Term);
        assert!(Section::from_name("videos").is_err());
    }

    #[test]
    fn test_level_slug_display() {
        assert_eq!(LevelSlug::display_for("high-school"), "High School");
        assert_eq!(LevelSlug::display_for("junior-high"), "Junior High School");
        assert_eq!(LevelSlug::display_for("college"), UNKNOWN_LEVEL);
    }

    #[test]
    fn test_listing_order_starts_with_notes_then_ebooks() {
        let order = Category::listing_order();
        assert_eq!(order[0], Category::Notes);
        assert_eq!(order[1], Category::EBooks);
        assert_eq!(order.len(), Category::all().len());
    }
}
