use folio_http::{Handler, Middleware, MiddlewareChain};
use hyper::Method;
use std::sync::Arc;

use crate::PathPattern;

/// Route definition: a method, a path pattern and the handler serving it.
///
/// Route middleware runs only for requests that matched this route, after
/// any application-wide middleware.
#[derive(Clone)]
pub struct Route {
	pub method: Method,
	pub pattern: PathPattern,
	pub name: Option<String>,
	handler: Arc<dyn Handler>,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl Route {
	/// Create a new route
	///
	/// # Examples
	///
	/// ```
	/// use folio_urls::{FnHandler, Route};
	/// use folio_http::{Request, Response, Result};
	/// use hyper::Method;
	/// use std::sync::Arc;
	///
	/// async fn list(_request: Request) -> Result<Response> {
	///     Ok(Response::ok())
	/// }
	///
	/// let route = Route::new(Method::GET, "/api/profile/all", Arc::new(FnHandler::new(list)))
	///     .with_name("profile-list");
	/// assert_eq!(route.pattern.as_str(), "/api/profile/all");
	/// ```
	pub fn new(method: Method, path: &str, handler: Arc<dyn Handler>) -> Self {
		Self {
			method,
			pattern: PathPattern::parse(path),
			name: None,
			handler,
			middleware: Vec::new(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Add middleware for this route only
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// Wrap this route in outer middleware, keeping existing ones innermost
	pub(crate) fn wrapped_in(mut self, outer: &[Arc<dyn Middleware>]) -> Self {
		let mut middleware = outer.to_vec();
		middleware.append(&mut self.middleware);
		self.middleware = middleware;
		self
	}

	pub(crate) fn with_prefix(mut self, prefix: &str) -> Self {
		self.pattern = self.pattern.with_prefix(prefix);
		self
	}

	/// The handler with this route's middleware applied
	pub fn handler(&self) -> Arc<dyn Handler> {
		if self.middleware.is_empty() {
			return self.handler.clone();
		}
		Arc::new(MiddlewareChain::new(self.handler.clone(), &self.middleware))
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("method", &self.method)
			.field("pattern", &self.pattern.as_str())
			.field("name", &self.name)
			.field("middleware", &self.middleware.len())
			.finish()
	}
}
