//! Project applications.
//!
//! - [`profile`]: the profile API under `/api/profile`
//! - [`download`]: HTML and JSON exports under `/api/download`
//! - [`portfolio`]: public themed pages under `/portfolio`

pub mod download;
pub mod portfolio;
pub mod profile;

use folio_core::Error;
use folio_http::Request;
use uuid::Uuid;

/// The `userId` path parameter of public routes.
///
/// An unparseable id cannot own a profile, so it reads as a missing one.
pub(crate) fn user_id_param(request: &Request) -> Result<Uuid, Error> {
	request
		.path_param("userId")
		.and_then(|raw| Uuid::parse_str(raw).ok())
		.ok_or_else(|| Error::NotFound("Profile not found".to_string()))
}
