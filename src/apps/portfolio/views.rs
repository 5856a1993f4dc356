use crate::apps::user_id_param;
use crate::state::AppState;
use folio_http::{Request, Response, Result};
use folio_profiles::Theme;

/// Public themed portfolio page
///
/// GET /portfolio/{userId}[?theme=modern|classic|creative]
/// Renders the stored theme unless `theme` overrides it; unknown names
/// render as modern.
pub async fn portfolio_page(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let user = user_id_param(&request)?;
	let profile = state.store.get_by_user(user).await?;

	let theme = request
		.query_param("theme")
		.map(Theme::from_name)
		.unwrap_or(profile.fields.theme);
	let html = state.projector.render(&profile, theme)?;
	Ok(Response::ok().with_html(html))
}
