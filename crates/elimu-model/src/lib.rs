//! Data model for the Elimu Online storefront.
//!
//! This crate isolates the rest of the workspace from backend drift:
//!
//! - [`RawResource`] is whatever the backend sent, kept untyped
//! - [`normalize`] reshapes it into the canonical [`NormalizedResource`]
//! - [`catalog`] holds the category/level/term vocabulary and level slugs
//! - [`grouping`] implements the section and level listings views consume
//! - [`account`] and [`payment`] hold the auth and M-Pesa payload types
//!
//! Nothing in here performs I/O.

pub mod account;
pub mod catalog;
pub mod error;
pub mod grouping;
pub mod payment;
pub mod resource;

pub use account::{AuthSession, LoginRequest, LoginResponse, RegisterRequest, UserProfile};
pub use catalog::{Category, Level, LevelSlug, Section, Term};
pub use error::{ModelError, Result};
pub use grouping::{ResourceGroup, group_for_level, group_for_section};
pub use payment::{PaymentReceipt, PaymentRequest, PaymentStatus, PhoneNumber};
pub use resource::{
    FreePolicy, NormalizedResource, RawResource, normalize, normalize_all, normalize_with,
    resolve_file_url,
};
