//! Exception taxonomy for request processing.
//!
//! Every handler, middleware and domain boundary reports failures through
//! [`Error`]. The HTTP layer turns an error into a response using
//! [`Error::status_code`] and [`Error::to_body`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	pub field: String,
	pub message: String,
}

impl FieldError {
	/// Creates a new field error.
	///
	/// # Examples
	///
	/// ```
	/// use folio_core::FieldError;
	///
	/// let error = FieldError::new("name", "Name is required");
	/// assert_eq!(error.field, "name");
	/// assert_eq!(error.message, "Name is required");
	/// ```
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Errors that can occur while handling a request
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Generic client error
	#[error("HTTP error: {0}")]
	Http(String),

	/// Request could not be interpreted
	#[error("Validation error: {0}")]
	Validation(String),

	/// One or more fields failed validation
	#[error("Validation failed for {} field(s)", .0.len())]
	FieldValidation(Vec<FieldError>),

	/// Missing or invalid credentials
	#[error("Authentication error: {0}")]
	Authentication(String),

	#[error("{0}")]
	NotFound(String),

	/// The resource exists but the method is not routed
	#[error("Method not allowed")]
	MethodNotAllowed,

	/// Write collided with an existing record
	#[error("{0}")]
	Conflict(String),

	/// The request body is larger than the server accepts
	#[error("Request body too large")]
	PayloadTooLarge,

	/// The request did not finish within the configured deadline
	#[error("Request timed out")]
	Timeout,

	#[error("Database error: {0}")]
	Database(String),

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Template error: {0}")]
	Template(String),

	#[error("Internal server error: {0}")]
	Internal(String),
}

/// Result alias used throughout the request pipeline
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// HTTP status code for this error.
	///
	/// Conflicts map to 400 because clients treat a duplicate first
	/// submission like any other rejected submission.
	///
	/// # Examples
	///
	/// ```
	/// use folio_core::Error;
	///
	/// assert_eq!(Error::NotFound("Profile not found".into()).status_code(), 404);
	/// assert_eq!(Error::Conflict("exists".into()).status_code(), 400);
	/// assert_eq!(Error::Database("down".into()).status_code(), 500);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::Http(_)
			| Error::Validation(_)
			| Error::FieldValidation(_)
			| Error::Conflict(_) => 400,
			Error::Authentication(_) => 401,
			Error::NotFound(_) => 404,
			Error::MethodNotAllowed => 405,
			Error::PayloadTooLarge => 413,
			Error::Timeout => 503,
			Error::Database(_)
			| Error::Serialization(_)
			| Error::Template(_)
			| Error::Internal(_) => 500,
		}
	}

	/// Whether this error is the server's fault rather than the client's.
	pub fn is_server_error(&self) -> bool {
		self.status_code() >= 500 && !matches!(self, Error::Timeout)
	}

	/// JSON body sent to the client.
	///
	/// Server-side failures carry a generic message; the underlying detail
	/// is only included when `debug` is set.
	///
	/// # Examples
	///
	/// ```
	/// use folio_core::Error;
	///
	/// let body = Error::Database("connection refused".into()).to_body(false);
	/// assert_eq!(body["message"], "Server error");
	/// assert!(body.get("error").is_none());
	///
	/// let body = Error::Database("connection refused".into()).to_body(true);
	/// assert_eq!(body["error"], "Database error: connection refused");
	/// ```
	pub fn to_body(&self, debug: bool) -> Value {
		match self {
			Error::FieldValidation(errors) => json!({
				"message": "Validation Error",
				"errors": errors,
			}),
			Error::Http(msg)
			| Error::Validation(msg)
			| Error::Authentication(msg)
			| Error::NotFound(msg)
			| Error::Conflict(msg) => json!({ "message": msg }),
			Error::MethodNotAllowed | Error::PayloadTooLarge | Error::Timeout => {
				json!({ "message": self.to_string() })
			}
			_ if debug => json!({
				"message": "Server error",
				"error": self.to_string(),
			}),
			_ => json!({ "message": "Server error" }),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Self {
		Error::Serialization(error.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Error::Http("bad".into()), 400)]
	#[case(Error::Validation("bad".into()), 400)]
	#[case(Error::FieldValidation(vec![]), 400)]
	#[case(Error::Conflict("Profile already exists for this user".into()), 400)]
	#[case(Error::Authentication("Token is not valid".into()), 401)]
	#[case(Error::NotFound("Profile not found".into()), 404)]
	#[case(Error::MethodNotAllowed, 405)]
	#[case(Error::PayloadTooLarge, 413)]
	#[case(Error::Timeout, 503)]
	#[case(Error::Database("x".into()), 500)]
	#[case(Error::Template("x".into()), 500)]
	#[case(Error::Internal("x".into()), 500)]
	fn test_status_codes(#[case] error: Error, #[case] expected: u16) {
		assert_eq!(error.status_code(), expected);
	}

	#[rstest]
	fn test_field_validation_body_lists_every_field() {
		let error = Error::FieldValidation(vec![
			FieldError::new("name", "Name is required"),
			FieldError::new("bio", "Bio is required"),
		]);

		let body = error.to_body(false);

		assert_eq!(body["message"], "Validation Error");
		assert_eq!(body["errors"][0]["field"], "name");
		assert_eq!(body["errors"][1]["message"], "Bio is required");
	}

	#[rstest]
	fn test_client_errors_keep_their_message() {
		let body = Error::Conflict("Profile already exists for this user".into()).to_body(false);
		assert_eq!(body["message"], "Profile already exists for this user");
	}

	#[rstest]
	fn test_timeout_is_not_counted_as_server_fault() {
		assert!(!Error::Timeout.is_server_error());
		assert!(Error::Internal("boom".into()).is_server_error());
	}
}
