//! The view model shared by every theme and the HTML export.

use crate::model::{Education, Experience, Profile, Project};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillView<'a> {
	pub name: &'a str,
	pub level: &'static str,
	pub category: &'static str,
	pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView<'a> {
	pub label: &'static str,
	pub url: &'a str,
}

/// Borrowed, template-ready projection of a [`Profile`].
///
/// Optional strings are `None` when unset so templates can test them
/// directly, and `social_links` only lists populated links.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView<'a> {
	pub name: &'a str,
	pub title: Option<&'a str>,
	pub bio: &'a str,
	pub photo: Option<&'a str>,
	pub location: Option<&'a str>,
	pub email: Option<&'a str>,
	pub phone: Option<&'a str>,
	pub skills: Vec<SkillView<'a>>,
	pub projects: &'a [Project],
	pub experience: &'a [Experience],
	pub education: &'a [Education],
	pub social_links: Vec<LinkView<'a>>,
	pub hobbies: &'a [String],
	/// Whether there is an email or phone to show.
	pub has_contact: bool,
}

impl<'a> ProfileView<'a> {
	pub fn from_profile(profile: &'a Profile) -> Self {
		let fields = &profile.fields;
		let links = &fields.social_links;
		let social_links = [
			("GitHub", &links.github),
			("LinkedIn", &links.linkedin),
			("Twitter", &links.twitter),
			("Website", &links.website),
		]
		.into_iter()
		.filter_map(|(label, url)| url.as_deref().map(|url| LinkView { label, url }))
		.collect();

		Self {
			name: &fields.name,
			title: fields.title.as_deref(),
			bio: &fields.bio,
			photo: fields.profile_photo.as_deref(),
			location: fields.location.as_deref(),
			email: fields.email.as_deref(),
			phone: fields.phone.as_deref(),
			skills: fields
				.skills
				.iter()
				.map(|skill| SkillView {
					name: &skill.name,
					level: skill.level.as_str(),
					category: skill.category.as_str(),
					percent: skill.level.percent(),
				})
				.collect(),
			projects: &fields.projects,
			experience: &fields.experience,
			education: &fields.education,
			social_links,
			hobbies: &fields.hobbies,
			has_contact: fields.email.is_some() || fields.phone.is_some(),
		}
	}
}
