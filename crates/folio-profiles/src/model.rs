//! Canonical profile records.
//!
//! Everything here is already normalized: strings are trimmed, blank
//! optionals are `None`, and collection entries carry all required fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Proficiency of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillLevel {
	Beginner,
	#[default]
	Intermediate,
	Advanced,
	Expert,
}

impl SkillLevel {
	/// Parses a level name, ignoring case. Unknown names yield `None`.
	pub fn parse(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"beginner" => Some(Self::Beginner),
			"intermediate" => Some(Self::Intermediate),
			"advanced" => Some(Self::Advanced),
			"expert" => Some(Self::Expert),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Beginner => "Beginner",
			Self::Intermediate => "Intermediate",
			Self::Advanced => "Advanced",
			Self::Expert => "Expert",
		}
	}

	/// Width of the proficiency bar drawn by the themes.
	pub fn percent(&self) -> u8 {
		match self {
			Self::Beginner => 25,
			Self::Intermediate => 50,
			Self::Advanced => 75,
			Self::Expert => 100,
		}
	}
}

impl fmt::Display for SkillLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillCategory {
	#[default]
	Technical,
	#[serde(rename = "Soft Skills")]
	SoftSkills,
	Languages,
	Tools,
	Other,
}

impl SkillCategory {
	/// Parses a category name, ignoring case. Unknown names yield `None`.
	pub fn parse(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"technical" => Some(Self::Technical),
			"soft skills" => Some(Self::SoftSkills),
			"languages" => Some(Self::Languages),
			"tools" => Some(Self::Tools),
			"other" => Some(Self::Other),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Technical => "Technical",
			Self::SoftSkills => "Soft Skills",
			Self::Languages => "Languages",
			Self::Tools => "Tools",
			Self::Other => "Other",
		}
	}
}

impl fmt::Display for SkillCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
	pub name: String,
	#[serde(default)]
	pub level: SkillLevel,
	#[serde(default)]
	pub category: SkillCategory,
}

impl Skill {
	/// A skill with the default level and category.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			level: SkillLevel::default(),
			category: SkillCategory::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub title: String,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link: Option<String>,
	#[serde(default)]
	pub tech_used: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
	pub title: String,
	pub company: String,
	pub duration: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
	pub degree: String,
	pub institution: String,
	pub year: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub github: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub linkedin: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub twitter: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub website: Option<String>,
}

impl SocialLinks {
	pub fn is_empty(&self) -> bool {
		self.github.is_none()
			&& self.linkedin.is_none()
			&& self.twitter.is_none()
			&& self.website.is_none()
	}
}

/// Visual theme of the public portfolio page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Modern,
	Classic,
	Creative,
}

impl Theme {
	pub const ALL: [Theme; 3] = [Theme::Modern, Theme::Classic, Theme::Creative];

	/// Resolves a theme by name. Unknown or empty names fall back to
	/// [`Theme::Modern`].
	///
	/// # Examples
	///
	/// ```
	/// use folio_profiles::Theme;
	///
	/// assert_eq!(Theme::from_name("Classic"), Theme::Classic);
	/// assert_eq!(Theme::from_name("bogus"), Theme::Modern);
	/// assert_eq!(Theme::from_name(""), Theme::Modern);
	/// ```
	pub fn from_name(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"classic" => Theme::Classic,
			"creative" => Theme::Creative,
			_ => Theme::Modern,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Theme::Modern => "modern",
			Theme::Classic => "classic",
			Theme::Creative => "creative",
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn default_true() -> bool {
	true
}

/// The user-editable part of a profile, as produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub bio: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub profile_photo: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default)]
	pub skills: Vec<Skill>,
	#[serde(default)]
	pub projects: Vec<Project>,
	#[serde(default)]
	pub experience: Vec<Experience>,
	#[serde(default)]
	pub education: Vec<Education>,
	#[serde(default)]
	pub social_links: SocialLinks,
	#[serde(default)]
	pub hobbies: Vec<String>,
	#[serde(default)]
	pub theme: Theme,
	#[serde(default = "default_true")]
	pub is_public: bool,
}

impl ProfileFields {
	/// Minimal valid fields, everything else at its default.
	pub fn new(name: impl Into<String>, bio: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: None,
			bio: bio.into(),
			profile_photo: None,
			location: None,
			phone: None,
			email: None,
			skills: Vec::new(),
			projects: Vec::new(),
			experience: Vec::new(),
			education: Vec::new(),
			social_links: SocialLinks::default(),
			hobbies: Vec::new(),
			theme: Theme::default(),
			is_public: true,
		}
	}
}

/// A stored profile. Exactly one exists per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	pub id: Uuid,
	pub user: Uuid,
	#[serde(flatten)]
	pub fields: ProfileFields,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("Beginner", Some(SkillLevel::Beginner))]
	#[case("expert", Some(SkillLevel::Expert))]
	#[case(" Advanced ", Some(SkillLevel::Advanced))]
	#[case("guru", None)]
	fn test_skill_level_parse(#[case] input: &str, #[case] expected: Option<SkillLevel>) {
		assert_eq!(SkillLevel::parse(input), expected);
	}

	#[rstest]
	#[case(SkillLevel::Beginner, 25)]
	#[case(SkillLevel::Intermediate, 50)]
	#[case(SkillLevel::Advanced, 75)]
	#[case(SkillLevel::Expert, 100)]
	fn test_skill_level_percent(#[case] level: SkillLevel, #[case] percent: u8) {
		assert_eq!(level.percent(), percent);
	}

	#[rstest]
	fn test_soft_skills_wire_name() {
		let skill = Skill {
			name: "Mentoring".into(),
			level: SkillLevel::Advanced,
			category: SkillCategory::SoftSkills,
		};
		assert_eq!(
			serde_json::to_value(&skill).unwrap(),
			json!({"name": "Mentoring", "level": "Advanced", "category": "Soft Skills"})
		);
		assert_eq!(SkillCategory::parse("soft skills"), Some(SkillCategory::SoftSkills));
	}

	#[rstest]
	fn test_profile_json_is_flat_camel_case_and_omits_unset() {
		let mut fields = ProfileFields::new("Ada", "Engineer");
		fields.social_links.github = Some("https://github.com/ada".into());
		let profile = Profile {
			id: Uuid::new_v4(),
			user: Uuid::new_v4(),
			fields,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		let value = serde_json::to_value(&profile).unwrap();

		assert_eq!(value["name"], "Ada");
		assert_eq!(value["isPublic"], true);
		assert_eq!(value["theme"], "modern");
		assert_eq!(value["socialLinks"], json!({"github": "https://github.com/ada"}));
		assert!(value.get("title").is_none());
		assert!(value.get("profilePhoto").is_none());
		assert!(value.get("createdAt").is_some());
		assert!(value.get("fields").is_none());
	}

	#[rstest]
	fn test_social_links_is_empty() {
		assert!(SocialLinks::default().is_empty());
		let links = SocialLinks {
			website: Some("https://ada.dev".into()),
			..Default::default()
		};
		assert!(!links.is_empty());
	}
}
