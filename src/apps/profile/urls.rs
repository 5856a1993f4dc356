use folio_http::{Middleware, Request, Response, Result};
use folio_urls::{FnHandler, Route, ServerRouter};
use hyper::Method;
use std::future::Future;
use std::sync::Arc;

use super::views;

fn private<F, Fut>(method: Method, func: F, auth: &Arc<dyn Middleware>) -> Route
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	Route::new(method, "/", Arc::new(FnHandler::new(func))).with_middleware(auth.clone())
}

/// Routes mounted under `/api/profile`. `auth` guards the private ones.
pub fn routes(auth: Arc<dyn Middleware>) -> ServerRouter {
	ServerRouter::new()
		.route(private(Method::POST, views::create_or_update, &auth).with_name("profile-save"))
		.route(private(Method::GET, views::current, &auth).with_name("profile-current"))
		.route(private(Method::DELETE, views::delete, &auth).with_name("profile-delete"))
		.get("/all", views::list_all)
		.get("/user/{userId}", views::by_user)
}
