//! Portfolio profiles.
//!
//! A submission goes through the [`normalizer`] into canonical
//! [`ProfileFields`], is persisted by a [`ProfileStore`], and is read back
//! as a [`Profile`] for the [`themes`] and [`export`] projections.

pub mod error;
pub mod export;
pub mod model;
pub mod normalizer;
pub mod raw;
pub mod store;
pub mod themes;

pub use error::ProfileError;
pub use model::{
	Education, Experience, Profile, ProfileFields, Project, Skill, SkillCategory, SkillLevel,
	SocialLinks, Theme,
};
pub use normalizer::normalize;
pub use raw::{RawList, RawSubmission};
pub use store::{ProfileStore, SqlProfileStore};
pub use themes::{ProfileView, ThemeError, ThemeProjector};
