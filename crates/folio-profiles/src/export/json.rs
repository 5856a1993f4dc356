use crate::model::{Education, Experience, Profile, Project, Skill, SocialLinks, Theme};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Portable JSON snapshot of a profile.
///
/// Carries the user-visible content only: no identifiers, owner, photo or
/// bookkeeping timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport<'a> {
	pub name: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<&'a str>,
	pub bio: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<&'a str>,
	pub skills: &'a [Skill],
	pub projects: &'a [Project],
	pub experience: &'a [Experience],
	pub education: &'a [Education],
	pub social_links: &'a SocialLinks,
	pub hobbies: &'a [String],
	pub theme: Theme,
	/// ISO-8601 UTC with millisecond precision
	pub exported_at: String,
}

impl<'a> JsonExport<'a> {
	pub fn new(profile: &'a Profile, exported_at: DateTime<Utc>) -> Self {
		let fields = &profile.fields;
		Self {
			name: &fields.name,
			title: fields.title.as_deref(),
			bio: &fields.bio,
			location: fields.location.as_deref(),
			email: fields.email.as_deref(),
			phone: fields.phone.as_deref(),
			skills: &fields.skills,
			projects: &fields.projects,
			experience: &fields.experience,
			education: &fields.education,
			social_links: &fields.social_links,
			hobbies: &fields.hobbies,
			theme: fields.theme,
			exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
		}
	}

	/// Pretty-printed document bytes.
	pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec_pretty(self)
	}
}
