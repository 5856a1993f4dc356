//! Turns a [`RawSubmission`] into canonical [`ProfileFields`].
//!
//! Only `name`, `bio` and `title` can fail the submission. Every other
//! field is coerced: malformed entries are dropped and malformed shapes
//! fall back to their empty value.

use crate::error::ProfileError;
use crate::model::{
	Education, Experience, ProfileFields, Project, Skill, SkillCategory, SkillLevel, SocialLinks,
	Theme,
};
use crate::raw::{RawList, RawSubmission};
use folio_core::FieldError;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// Fields checked before anything else is normalized.
const FIELD_ORDER: [&str; 3] = ["name", "title", "bio"];

#[derive(Debug, Validate)]
struct RequiredFields {
	#[validate(custom(function = "required", message = "Name is required"))]
	#[validate(length(max = 100, message = "Name must be less than 100 characters"))]
	name: String,

	#[validate(length(max = 100, message = "Title must be less than 100 characters"))]
	title: Option<String>,

	#[validate(custom(function = "required", message = "Bio is required"))]
	#[validate(length(max = 500, message = "Bio must be less than 500 characters"))]
	bio: String,
}

fn required(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::new("required"));
	}
	Ok(())
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
	let mut out: Vec<FieldError> = errors
		.field_errors()
		.into_iter()
		.flat_map(|(field, errs)| {
			errs.iter().map(move |err| {
				let message = err
					.message
					.as_ref()
					.map(|m| m.to_string())
					.unwrap_or_else(|| format!("{field} is invalid"));
				FieldError::new(field.to_string(), message)
			})
		})
		.collect();
	out.sort_by_key(|e| {
		FIELD_ORDER
			.iter()
			.position(|f| *f == e.field)
			.unwrap_or(FIELD_ORDER.len())
	});
	out
}

/// Normalizes a raw submission.
///
/// # Examples
///
/// ```
/// use folio_profiles::{normalize, RawSubmission, SkillLevel};
/// use serde_json::json;
///
/// let raw = RawSubmission::from_value(json!({
///     "name": "  Ada  ",
///     "bio": "Engineer",
///     "skills": "Go, Rust",
/// }));
/// let fields = normalize(raw).unwrap();
/// assert_eq!(fields.name, "Ada");
/// assert_eq!(fields.skills.len(), 2);
/// assert_eq!(fields.skills[1].level, SkillLevel::Intermediate);
/// ```
pub fn normalize(raw: RawSubmission) -> Result<ProfileFields, ProfileError> {
	let required = RequiredFields {
		name: scalar(&raw.name).unwrap_or_default(),
		title: scalar(&raw.title),
		bio: scalar(&raw.bio).unwrap_or_default(),
	};
	if let Err(errors) = required.validate() {
		let errors = field_errors(&errors);
		tracing::debug!(count = errors.len(), "profile submission rejected");
		return Err(ProfileError::Validation(errors));
	}

	Ok(ProfileFields {
		name: required.name,
		title: required.title,
		bio: required.bio,
		profile_photo: scalar(&raw.profile_photo).and_then(web_link),
		location: scalar(&raw.location),
		phone: scalar(&raw.phone),
		email: scalar(&raw.email),
		skills: skills(&raw.skills),
		projects: objects(&raw.projects, project),
		experience: objects(&raw.experience, experience),
		education: objects(&raw.education, education),
		social_links: social_links(&raw.social_links),
		hobbies: strings(&raw.hobbies),
		theme: scalar(&raw.theme)
			.map(|name| Theme::from_name(&name))
			.unwrap_or_default(),
		is_public: is_public(&raw.is_public),
	})
}

/// Trimmed string for strings and numbers; blank and other shapes are unset.
fn scalar(value: &Value) -> Option<String> {
	let s = match value {
		Value::String(s) => s.trim().to_string(),
		Value::Number(n) => n.to_string(),
		_ => return None,
	};
	(!s.is_empty()).then_some(s)
}

fn field(object: &Map<String, Value>, key: &str) -> Option<String> {
	object.get(key).and_then(scalar)
}

fn link(object: &Map<String, Value>, key: &str) -> Option<String> {
	field(object, key).and_then(web_link)
}

/// Keeps relative and http(s) URLs. Other schemes (`javascript:`, `data:`) are dropped.
fn web_link(url: String) -> Option<String> {
	let scheme_end = url.find(|c| matches!(c, ':' | '/' | '?' | '#'));
	match scheme_end {
		Some(i) if url[i..].starts_with(':') => {
			let scheme = &url[..i];
			let allowed =
				scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https");
			allowed.then_some(url)
		}
		_ => Some(url),
	}
}

fn skills(value: &Value) -> Vec<Skill> {
	match RawList::classify(value) {
		RawList::Items(items) => items.iter().filter_map(skill).collect(),
		RawList::CommaString(s) => RawList::split_commas(&s)
			.into_iter()
			.map(Skill::named)
			.collect(),
		RawList::Absent => Vec::new(),
	}
}

fn skill(value: &Value) -> Option<Skill> {
	match value {
		Value::Object(object) => Some(Skill {
			name: field(object, "name")?,
			level: field(object, "level")
				.and_then(|l| SkillLevel::parse(&l))
				.unwrap_or_default(),
			category: field(object, "category")
				.and_then(|c| SkillCategory::parse(&c))
				.unwrap_or_default(),
		}),
		other => scalar(other).map(Skill::named),
	}
}

/// Keeps the object entries of a list that `build` accepts. Comma strings
/// carry no structure, so they produce nothing.
fn objects<T>(value: &Value, build: fn(&Map<String, Value>) -> Option<T>) -> Vec<T> {
	match RawList::classify(value) {
		RawList::Items(items) => items
			.iter()
			.filter_map(Value::as_object)
			.filter_map(build)
			.collect(),
		RawList::CommaString(_) | RawList::Absent => Vec::new(),
	}
}

fn project(object: &Map<String, Value>) -> Option<Project> {
	Some(Project {
		title: field(object, "title")?,
		description: field(object, "description")?,
		link: link(object, "link"),
		tech_used: object.get("techUsed").map(strings).unwrap_or_default(),
		image_url: link(object, "imageUrl"),
	})
}

fn experience(object: &Map<String, Value>) -> Option<Experience> {
	Some(Experience {
		title: field(object, "title")?,
		company: field(object, "company")?,
		duration: field(object, "duration")?,
		description: field(object, "description"),
	})
}

fn education(object: &Map<String, Value>) -> Option<Education> {
	Some(Education {
		degree: field(object, "degree")?,
		institution: field(object, "institution")?,
		year: field(object, "year")?,
		grade: field(object, "grade"),
	})
}

fn strings(value: &Value) -> Vec<String> {
	match RawList::classify(value) {
		RawList::Items(items) => items.iter().filter_map(scalar).collect(),
		RawList::CommaString(s) => RawList::split_commas(&s),
		RawList::Absent => Vec::new(),
	}
}

fn social_links(value: &Value) -> SocialLinks {
	let Some(object) = value.as_object() else {
		return SocialLinks::default();
	};
	SocialLinks {
		github: link(object, "github"),
		linkedin: link(object, "linkedin"),
		twitter: link(object, "twitter"),
		website: link(object, "website"),
	}
}

fn is_public(value: &Value) -> bool {
	match value {
		Value::Bool(b) => *b,
		Value::String(s) => !matches!(
			s.trim().to_ascii_lowercase().as_str(),
			"false" | "0" | "no" | "off"
		),
		Value::Number(n) => n.as_i64() != Some(0),
		_ => true,
	}
}
