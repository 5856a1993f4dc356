//! Profile domain errors.

use folio_core::{Error, FieldError};

pub const PROFILE_NOT_FOUND: &str = "Profile not found";
pub const PROFILE_EXISTS: &str = "Profile already exists for this user";

/// Errors raised by normalization and storage of profiles
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
	/// Required fields were missing or out of bounds
	#[error("Validation failed: {0:?}")]
	Validation(Vec<FieldError>),

	#[error("Profile not found")]
	NotFound,

	/// The user already owns a profile
	#[error("Profile already exists for this user")]
	Conflict,

	#[error("Database error: {0}")]
	Database(String),

	/// A stored row could not be decoded
	#[error("Corrupt profile row: {0}")]
	Corrupt(String),
}

impl ProfileError {
	pub(crate) fn from_sqlx(error: sqlx::Error) -> Self {
		match &error {
			sqlx::Error::Database(db) if db.is_unique_violation() => ProfileError::Conflict,
			sqlx::Error::RowNotFound => ProfileError::NotFound,
			_ => ProfileError::Database(error.to_string()),
		}
	}
}

impl From<serde_json::Error> for ProfileError {
	fn from(error: serde_json::Error) -> Self {
		ProfileError::Corrupt(error.to_string())
	}
}

impl From<ProfileError> for Error {
	fn from(error: ProfileError) -> Self {
		match error {
			ProfileError::Validation(errors) => Error::FieldValidation(errors),
			ProfileError::NotFound => Error::NotFound(PROFILE_NOT_FOUND.to_string()),
			ProfileError::Conflict => Error::Conflict(PROFILE_EXISTS.to_string()),
			ProfileError::Database(msg) => Error::Database(msg),
			ProfileError::Corrupt(msg) => Error::Serialization(msg),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ProfileError::NotFound, 404, "Profile not found")]
	#[case(ProfileError::Conflict, 400, "Profile already exists for this user")]
	fn test_client_facing_conversions(
		#[case] error: ProfileError,
		#[case] status: u16,
		#[case] message: &str,
	) {
		let error: Error = error.into();
		assert_eq!(error.status_code(), status);
		assert_eq!(error.to_body(false)["message"], message);
	}

	#[rstest]
	fn test_validation_keeps_field_errors() {
		let error: Error =
			ProfileError::Validation(vec![FieldError::new("name", "Name is required")]).into();
		let body = error.to_body(false);
		assert_eq!(body["message"], "Validation Error");
		assert_eq!(body["errors"][0]["field"], "name");
	}

	#[rstest]
	fn test_database_detail_is_hidden() {
		let error: Error = ProfileError::Database("disk I/O error".into()).into();
		assert_eq!(error.status_code(), 500);
		assert_eq!(error.to_body(false)["message"], "Server error");
	}
}
