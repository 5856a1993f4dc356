use super::Request;
use hyper::Uri;
use std::collections::HashMap;

impl Request {
	/// Parse and decode query parameters from the URI.
	///
	/// Malformed query strings yield no parameters rather than an error.
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
			.map(|pairs| pairs.into_iter().collect())
			.unwrap_or_default()
	}

	/// Get the request path
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get a decoded query parameter
	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query_params.get(name).map(String::as_str)
	}

	/// Get a path parameter captured by the router
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Request;
	///
	/// let mut request = Request::builder().uri("/api/profile/user/42").build().unwrap();
	/// request.set_path_param("user_id", "42");
	/// assert_eq!(request.path_param("user_id"), Some("42"));
	/// ```
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}

	/// Set a path parameter (used by routers for path variable extraction)
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}

	/// Get a header value as a string, if present and valid UTF-8
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|h| h.to_str().ok())
	}

	/// Token from an `Authorization: Bearer <token>` header.
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Request;
	///
	/// let request = Request::builder()
	///     .header("authorization", "Bearer abc.def.ghi")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.bearer_token(), Some("abc.def.ghi"));
	///
	/// let request = Request::builder().build().unwrap();
	/// assert_eq!(request.bearer_token(), None);
	/// ```
	pub fn bearer_token(&self) -> Option<&str> {
		let value = self.header("authorization")?;
		let (scheme, token) = value.split_once(' ')?;
		if !scheme.eq_ignore_ascii_case("bearer") {
			return None;
		}
		let token = token.trim();
		(!token.is_empty()).then_some(token)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/p?theme=classic", Some("classic"))]
	#[case("/p?theme=creative&x=1", Some("creative"))]
	#[case("/p?name=John%20Doe&theme=a+b", Some("a b"))]
	#[case("/p", None)]
	fn test_query_params_are_decoded(#[case] uri: &str, #[case] expected: Option<&str>) {
		let request = Request::builder().uri(uri).build().unwrap();
		assert_eq!(request.query_param("theme"), expected);
	}

	#[rstest]
	#[case("Bearer token", Some("token"))]
	#[case("bearer token", Some("token"))]
	#[case("Basic dXNlcg==", None)]
	#[case("Bearer ", None)]
	#[case("token", None)]
	fn test_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
		let request = Request::builder()
			.header("authorization", header)
			.build()
			.unwrap();
		assert_eq!(request.bearer_token(), expected);
	}
}
