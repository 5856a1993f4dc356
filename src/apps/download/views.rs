//! Download view handlers.
//!
//! The profile is fetched first; a missing profile answers 404 before any
//! export is generated.

use crate::apps::user_id_param;
use crate::state::AppState;
use chrono::Utc;
use folio_core::Error;
use folio_http::{Request, Response, Result};
use folio_profiles::export::{
	ExportFormat, JsonExport, content_disposition, download_filename, render_html,
};

fn attachment(body: Vec<u8>, name: &str, format: ExportFormat) -> Response {
	let filename = download_filename(name, format);
	Response::ok()
		.with_body(body)
		.with_content_type(format.content_type())
		.with_header("Content-Disposition", &content_disposition(&filename))
}

/// GET /api/download/portfolio/{userId}
pub async fn download_html(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = user_id_param(&request)?;
	let profile = state.store.get_by_user(user).await?;

	let html = render_html(&profile, Utc::now(), &state.public_base_url)?;
	tracing::info!(%user, "portfolio exported as html");
	Ok(attachment(html.into_bytes(), &profile.fields.name, ExportFormat::Html))
}

/// GET /api/download/portfolio/{userId}/json
pub async fn download_json(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = user_id_param(&request)?;
	let profile = state.store.get_by_user(user).await?;

	let body = JsonExport::new(&profile, Utc::now())
		.to_bytes()
		.map_err(Error::from)?;
	tracing::info!(%user, "portfolio exported as json");
	Ok(attachment(body, &profile.fields.name, ExportFormat::Json))
}
