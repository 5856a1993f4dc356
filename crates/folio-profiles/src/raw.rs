//! Untyped profile submissions.
//!
//! A [`RawSubmission`] accepts any JSON shape for every field so that
//! deserialization itself never rejects a client payload. List-ish fields
//! are classified once into a [`RawList`].

use serde::Deserialize;
use serde_json::Value;

/// A profile submission exactly as the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubmission {
	pub name: Value,
	pub title: Value,
	pub bio: Value,
	pub profile_photo: Value,
	pub location: Value,
	pub phone: Value,
	pub email: Value,
	pub skills: Value,
	pub projects: Value,
	pub experience: Value,
	pub education: Value,
	pub social_links: Value,
	pub hobbies: Value,
	pub theme: Value,
	pub is_public: Value,
}

impl RawSubmission {
	/// Builds a submission from a decoded request body.
	///
	/// Anything other than a JSON object is treated as an empty submission,
	/// which then fails validation on the required fields.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
			_ => Self::default(),
		}
	}
}

/// A list-ish field after boundary classification
#[derive(Debug, Clone, PartialEq)]
pub enum RawList {
	/// A JSON array
	Items(Vec<Value>),
	/// A single string, to be split on commas
	CommaString(String),
	/// Missing, null, or any other shape
	Absent,
}

impl RawList {
	/// Classifies a raw value.
	///
	/// # Examples
	///
	/// ```
	/// use folio_profiles::RawList;
	/// use serde_json::json;
	///
	/// assert_eq!(RawList::classify(&json!("Go, Rust")), RawList::CommaString("Go, Rust".into()));
	/// assert_eq!(RawList::classify(&json!(null)), RawList::Absent);
	/// assert_eq!(RawList::classify(&json!(42)), RawList::Absent);
	/// ```
	pub fn classify(value: &Value) -> Self {
		match value {
			Value::Array(items) => RawList::Items(items.clone()),
			Value::String(s) => RawList::CommaString(s.clone()),
			_ => RawList::Absent,
		}
	}

	/// Splits a comma string into trimmed, non-empty parts.
	pub fn split_commas(s: &str) -> Vec<String> {
		s.split(',')
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.map(str::to_string)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_any_shape_deserializes() {
		let raw = RawSubmission::from_value(json!({
			"name": 42,
			"skills": {"unexpected": true},
			"socialLinks": "nope",
			"isPublic": "false",
			"unknownField": [1, 2, 3],
		}));

		assert_eq!(raw.name, json!(42));
		assert_eq!(raw.is_public, json!("false"));
		assert_eq!(raw.bio, Value::Null);
	}

	#[rstest]
	#[case(json!([1, 2, 3]))]
	#[case(json!("just a string"))]
	#[case(json!(null))]
	fn test_non_object_body_is_empty_submission(#[case] body: Value) {
		let raw = RawSubmission::from_value(body);
		assert_eq!(raw.name, Value::Null);
	}

	#[rstest]
	#[case(json!(["a", "b"]), RawList::Items(vec![json!("a"), json!("b")]))]
	#[case(json!("a,b"), RawList::CommaString("a,b".into()))]
	#[case(json!(null), RawList::Absent)]
	#[case(json!({"a": 1}), RawList::Absent)]
	#[case(json!(true), RawList::Absent)]
	fn test_classify(#[case] value: Value, #[case] expected: RawList) {
		assert_eq!(RawList::classify(&value), expected);
	}

	#[rstest]
	fn test_split_commas_drops_empties() {
		assert_eq!(RawList::split_commas(" Go, ,Rust ,,"), vec!["Go", "Rust"]);
		assert!(RawList::split_commas("").is_empty());
	}
}
