//! Radial grid and plasma profile primitives.
//!
//! Source terms read a [`CoreProfiles`] snapshot laid out on a [`Grid`] and
//! return a [`SourceProfile`] holding one contribution per
//! [`AffectedProfile`] channel.

/// Profile shape errors.
pub mod error;
/// Uniform radial grid in normalized toroidal flux coordinate.
pub mod grid;
/// Plasma state profiles consumed by source terms.
pub mod profiles;
/// Per-channel source contributions.
pub mod source_profile;

pub use error::ProfileError;
pub use grid::Grid;
pub use profiles::{AffectedProfile, CoreProfiles};
pub use source_profile::SourceProfile;
