//! URL configuration for the project.

use crate::apps;
use crate::state::AppState;
use folio_auth::JwtAuthMiddleware;
use folio_conf::Settings;
use folio_server::HttpServer;
use folio_urls::ServerRouter;
use std::sync::Arc;
use std::time::Duration;

use super::middleware::create_middleware_stack;
use super::views;

/// Every route of the project.
pub fn url_patterns(state: &AppState) -> ServerRouter {
	let auth = Arc::new(JwtAuthMiddleware::new(state.jwt.clone()));

	ServerRouter::new()
		.get("/", views::index)
		.get("/api/health", views::health_check)
		.mount("/api/profile", apps::profile::urls::routes(auth))
		.mount("/api/download", apps::download::urls::routes())
		.mount("/portfolio", apps::portfolio::urls::routes())
}

/// The project served by an [`HttpServer`].
///
/// The request timeout applies inside the middleware stack so that a timed
/// out request is still logged and still carries CORS headers.
pub fn build_server(state: Arc<AppState>, request_timeout: Duration, debug: bool) -> HttpServer {
	let router = Arc::new(url_patterns(&state));
	let server = HttpServer::new(router)
		.with_request_timeout(request_timeout)
		.with_debug(debug);

	create_middleware_stack(state, debug)
		.into_iter()
		.fold(server, HttpServer::with_middleware)
}

/// [`build_server`] with values taken from `settings`.
pub fn server_from_settings(state: Arc<AppState>, settings: &Settings) -> HttpServer {
	build_server(state, settings.server.request_timeout(), settings.debug)
		.with_max_body_size(settings.server.max_body_bytes)
}
