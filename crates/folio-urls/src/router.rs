use async_trait::async_trait;
use folio_core::exception::Error;
use folio_http::{Handler, Middleware, Request, Response, Result};
use hyper::Method;
use std::future::Future;
use std::sync::Arc;

use crate::{FnHandler, Route};

/// Router serving a flat list of routes.
///
/// Middleware added to a router applies to every route it holds, including
/// routes mounted into another router later.
#[derive(Clone, Default)]
pub struct ServerRouter {
	routes: Vec<Route>,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl ServerRouter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an async function for a method and path
	pub fn function<F, Fut>(self, method: Method, path: &str, func: F) -> Self
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.route(Route::new(method, path, Arc::new(FnHandler::new(func))))
	}

	pub fn get<F, Fut>(self, path: &str, func: F) -> Self
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.function(Method::GET, path, func)
	}

	pub fn post<F, Fut>(self, path: &str, func: F) -> Self
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.function(Method::POST, path, func)
	}

	pub fn delete<F, Fut>(self, path: &str, func: F) -> Self
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.function(Method::DELETE, path, func)
	}

	/// Add a prebuilt route
	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Add middleware applied to every route of this router
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// Mount another router's routes under `prefix`.
	///
	/// The child's middleware is baked into its routes, so it keeps applying
	/// only to them.
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::{Request, Response, Result};
	/// use folio_urls::ServerRouter;
	///
	/// async fn list(_request: Request) -> Result<Response> {
	///     Ok(Response::ok())
	/// }
	///
	/// let profiles = ServerRouter::new().get("/all", list);
	/// let root = ServerRouter::new().mount("/api/profile", profiles);
	/// assert_eq!(root.routes()[0].pattern.as_str(), "/api/profile/all");
	/// ```
	pub fn mount(mut self, prefix: &str, child: ServerRouter) -> Self {
		let ServerRouter { routes, middleware } = child;
		self.routes.extend(
			routes
				.into_iter()
				.map(|route| route.wrapped_in(&middleware).with_prefix(prefix)),
		);
		self
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	fn resolve(&self, request: &mut Request) -> Result<Arc<dyn Handler>> {
		let path = request.path().to_string();
		let mut path_matched = false;

		for route in &self.routes {
			let Some(params) = route.pattern.matches(&path) else {
				continue;
			};
			path_matched = true;
			if route.method != request.method {
				continue;
			}
			for (key, value) in params {
				request.set_path_param(key, value);
			}
			let handler = route.wrapped_in_router(&self.middleware);
			return Ok(handler);
		}

		if path_matched {
			tracing::debug!(method = %request.method, path = %path, "method not allowed");
			Err(Error::MethodNotAllowed)
		} else {
			Err(Error::NotFound("Not found".to_string()))
		}
	}
}

impl Route {
	fn wrapped_in_router(&self, router_middleware: &[Arc<dyn Middleware>]) -> Arc<dyn Handler> {
		if router_middleware.is_empty() {
			self.handler()
		} else {
			self.clone().wrapped_in(router_middleware).handler()
		}
	}
}

#[async_trait]
impl Handler for ServerRouter {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let handler = self.resolve(&mut request)?;
		handler.handle(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_core::exception::Error;
	use rstest::rstest;

	async fn echo_param(request: Request) -> Result<Response> {
		let id = request.path_param("user_id").unwrap_or("none").to_string();
		Ok(Response::ok().with_body(id))
	}

	async fn created(_request: Request) -> Result<Response> {
		Ok(Response::ok().with_body("created"))
	}

	struct Deny;

	#[async_trait]
	impl Middleware for Deny {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Err(Error::Authentication("No token, authorization denied".into()))
		}
	}

	fn request(method: Method, uri: &str) -> Request {
		Request::builder().method(method).uri(uri).build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_path_params_reach_handler() {
		let router = ServerRouter::new().get("/api/profile/user/{user_id}", echo_param);

		let response = router
			.handle(request(Method::GET, "/api/profile/user/abc"))
			.await
			.unwrap();

		assert_eq!(response.body_text(), "abc");
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_path_is_not_found() {
		let router = ServerRouter::new().get("/api/profile", echo_param);

		let error = router
			.handle(request(Method::GET, "/nope"))
			.await
			.unwrap_err();

		assert!(matches!(error, Error::NotFound(ref msg) if msg == "Not found"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_wrong_method_is_not_allowed() {
		let router = ServerRouter::new().get("/api/profile", echo_param);

		let error = router
			.handle(request(Method::PUT, "/api/profile"))
			.await
			.unwrap_err();

		assert!(matches!(error, Error::MethodNotAllowed));
	}

	#[rstest]
	#[tokio::test]
	async fn test_mounted_middleware_stays_scoped() {
		let private = ServerRouter::new()
			.with_middleware(Arc::new(Deny))
			.post("/", created);
		let router = ServerRouter::new()
			.get("/api/profile/user/{user_id}", echo_param)
			.mount("/api/profile", private);

		let public = router
			.handle(request(Method::GET, "/api/profile/user/x"))
			.await;
		let guarded = router.handle(request(Method::POST, "/api/profile")).await;

		assert!(public.is_ok());
		assert_eq!(guarded.unwrap_err().status_code(), 401);
	}

	#[rstest]
	#[tokio::test]
	async fn test_route_middleware() {
		let router = ServerRouter::new()
			.route(
				Route::new(Method::GET, "/secret", Arc::new(FnHandler::new(created)))
					.with_middleware(Arc::new(Deny)),
			)
			.get("/open", created);

		assert!(router.handle(request(Method::GET, "/open")).await.is_ok());
		assert!(router.handle(request(Method::GET, "/secret")).await.is_err());
	}
}
