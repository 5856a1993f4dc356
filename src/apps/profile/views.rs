//! Profile view handlers.

use crate::apps::user_id_param;
use crate::state::AppState;
use folio_auth::CurrentUser;
use folio_http::{Request, Response, Result};
use folio_profiles::{RawSubmission, normalize};
use serde_json::json;

/// Create or replace the caller's profile
///
/// POST /api/profile
/// Body: JSON or form-encoded profile fields.
/// Success response: 200 OK with the stored profile
/// Error responses:
/// - 400 Bad Request: validation errors, malformed body, or a concurrent
///   first submission won the race
/// - 401 Unauthorized: missing or invalid token
pub async fn create_or_update(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = CurrentUser::from_request(&request)?.id();

	let raw = RawSubmission::from_value(request.body_value()?);
	let fields = normalize(raw)?;
	let profile = state.store.upsert(user, fields).await?;

	tracing::info!(%user, "profile saved");
	Response::ok().with_json(&profile)
}

/// The caller's own profile
///
/// GET /api/profile
pub async fn current(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = CurrentUser::from_request(&request)?.id();

	let profile = state.store.get_by_user(user).await?;
	Response::ok().with_json(&profile)
}

/// Anyone's profile by user id
///
/// GET /api/profile/user/{userId}
/// `isPublic` is informational only; every stored profile is readable.
pub async fn by_user(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = user_id_param(&request)?;

	let profile = state.store.get_by_user(user).await?;
	Response::ok().with_json(&profile)
}

/// GET /api/profile/all
pub async fn list_all(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let profiles = state.store.get_all().await?;
	Response::ok().with_json(&profiles)
}

/// Delete the caller's profile; succeeds whether or not one existed
///
/// DELETE /api/profile
pub async fn delete(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = CurrentUser::from_request(&request)?.id();

	state.store.delete_by_user(user).await?;
	tracing::info!(%user, "profile deleted");
	Response::ok().with_json(&json!({ "message": "Profile deleted" }))
}
