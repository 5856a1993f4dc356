//! Outgoing HTTP response.

use bytes::Bytes;
use folio_core::exception::{Error, Result};
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

/// HTTP Response representation
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header; invalid names or values are ignored
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Response;
	///
	/// let response = Response::ok().with_header("Content-Disposition", "attachment");
	/// assert_eq!(
	///     response.headers.get("content-disposition").unwrap().to_str().unwrap(),
	///     "attachment"
	/// );
	/// ```
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let (Ok(name), Ok(value)) = (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			self.headers.insert(name, value);
		}
		self
	}

	pub fn with_typed_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Set the Content-Type header
	pub fn with_content_type(self, content_type: &'static str) -> Self {
		self.with_typed_header(CONTENT_TYPE, HeaderValue::from_static(content_type))
	}

	/// Set the response body to JSON and add the matching Content-Type
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!({"message": "Profile deleted"})).unwrap();
	///
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap().to_str().unwrap(),
	///     "application/json"
	/// );
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
		let json = serde_json::to_vec(data).map_err(|e| Error::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		Ok(self.with_content_type("application/json"))
	}

	/// Set an HTML body
	pub fn with_html(self, html: impl Into<String>) -> Self {
		self.with_body(html.into())
			.with_content_type("text/html; charset=utf-8")
	}

	/// Build the response for an error.
	///
	/// Server-side error details are only exposed when `debug` is set.
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::{Error, Response};
	/// use hyper::StatusCode;
	///
	/// let response = Response::from_error(&Error::NotFound("Profile not found".into()), false);
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// assert_eq!(response.body_text(), r#"{"message":"Profile not found"}"#);
	/// ```
	pub fn from_error(error: &Error, debug: bool) -> Self {
		let status = StatusCode::from_u16(error.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let body = serde_json::to_vec(&error.to_body(debug)).unwrap_or_default();
		Self::new(status)
			.with_body(body)
			.with_content_type("application/json")
	}

	/// Body as UTF-8 text, lossy
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

impl From<Error> for Response {
	fn from(error: Error) -> Self {
		Response::from_error(&error, false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_core::FieldError;
	use rstest::rstest;
	use serde_json::Value;

	#[rstest]
	fn test_validation_error_response() {
		let error = Error::FieldValidation(vec![FieldError::new("bio", "Bio is required")]);

		let response = Response::from(error);

		assert_eq!(response.status, StatusCode::BAD_REQUEST);
		let body: Value = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(body["message"], "Validation Error");
		assert_eq!(body["errors"][0]["field"], "bio");
	}

	#[rstest]
	#[case(false, None)]
	#[case(true, Some("Database error: disk I/O error"))]
	fn test_server_error_detail_depends_on_debug(
		#[case] debug: bool,
		#[case] detail: Option<&str>,
	) {
		let error = Error::Database("disk I/O error".into());

		let response = Response::from_error(&error, debug);

		assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
		let body: Value = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(body["message"], "Server error");
		assert_eq!(body.get("error").and_then(Value::as_str), detail);
	}

	#[rstest]
	fn test_html_content_type() {
		let response = Response::ok().with_html("<p>hi</p>");
		assert_eq!(
			response.headers.get(CONTENT_TYPE).unwrap(),
			"text/html; charset=utf-8"
		);
	}
}
