use folio_urls::ServerRouter;

use super::views;

/// Routes mounted under `/api/download`.
pub fn routes() -> ServerRouter {
	ServerRouter::new()
		.get("/portfolio/{userId}", views::download_html)
		.get("/portfolio/{userId}/json", views::download_json)
}
