use folio_urls::ServerRouter;

use super::views;

/// Routes mounted under `/portfolio`.
pub fn routes() -> ServerRouter {
	ServerRouter::new().get("/{userId}", views::portfolio_page)
}
