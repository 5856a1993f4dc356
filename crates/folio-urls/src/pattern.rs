//! Path patterns with `{name}` placeholders.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
}

/// A parsed route pattern such as `/api/profile/user/{user_id}`.
///
/// Each placeholder matches exactly one non-empty path segment. A single
/// trailing slash on the request path is ignored.
///
/// # Examples
///
/// ```
/// use folio_urls::PathPattern;
///
/// let pattern = PathPattern::parse("/portfolio/{user_id}");
/// let params = pattern.matches("/portfolio/abc").unwrap();
/// assert_eq!(params["user_id"], "abc");
/// assert!(pattern.matches("/portfolio").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
	raw: String,
	segments: Vec<Segment>,
}

impl PathPattern {
	pub fn parse(pattern: &str) -> Self {
		let segments = split(pattern)
			.map(|segment| {
				match segment
					.strip_prefix('{')
					.and_then(|rest| rest.strip_suffix('}'))
				{
					Some(name) => Segment::Param(name.to_string()),
					None => Segment::Literal(segment.to_string()),
				}
			})
			.collect();
		Self {
			raw: normalize(pattern),
			segments,
		}
	}

	/// The normalized pattern string
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Match a request path, returning the percent-decoded parameters
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let parts: Vec<&str> = split(path).collect();
		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(literal) if literal == part => {}
				Segment::Literal(_) => return None,
				Segment::Param(name) => {
					let value = percent_decode_str(part).decode_utf8_lossy().into_owned();
					params.insert(name.clone(), value);
				}
			}
		}
		Some(params)
	}

	/// Prepend a prefix such as `/api`
	pub fn with_prefix(&self, prefix: &str) -> Self {
		let prefix = prefix.trim_end_matches('/');
		Self::parse(&format!("{}{}", prefix, self.raw))
	}
}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

fn split(path: &str) -> impl Iterator<Item = &str> {
	path.split('/').filter(|segment| !segment.is_empty())
}

fn normalize(pattern: &str) -> String {
	let joined = split(pattern).collect::<Vec<_>>().join("/");
	format!("/{}", joined)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/", true)]
	#[case("/api/profile", "/api/profile", true)]
	#[case("/api/profile", "/api/profile/", true)]
	#[case("/api/profile", "/api/profiles", false)]
	#[case("/api/profile/user/{user_id}", "/api/profile/user/", false)]
	#[case("/api/profile/user/{user_id}", "/api/profile/user/a/b", false)]
	#[case("/api/download/portfolio/{user_id}/json", "/api/download/portfolio/x/json", true)]
	fn test_matches(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		assert_eq!(PathPattern::parse(pattern).matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_params_are_decoded() {
		let pattern = PathPattern::parse("/portfolio/{user_id}");
		let params = pattern.matches("/portfolio/a%20b").unwrap();
		assert_eq!(params["user_id"], "a b");
	}

	#[rstest]
	fn test_prefix() {
		let pattern = PathPattern::parse("/user/{user_id}").with_prefix("/api/profile/");
		assert_eq!(pattern.as_str(), "/api/profile/user/{user_id}");
		assert_eq!(pattern.matches("/api/profile/user/7").unwrap()["user_id"], "7");
	}
}
