//! Project middleware stack.

use crate::state::AppState;
use async_trait::async_trait;
use folio_http::{Handler, Middleware, Request, Response, Result};
use hyper::Method;
use std::sync::Arc;
use std::time::Instant;

/// Makes the shared [`AppState`] available to views through the request
/// extensions.
pub struct AppContextMiddleware {
	state: Arc<AppState>,
}

impl AppContextMiddleware {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Middleware for AppContextMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		request.extensions.insert(self.state.clone());
		next.handle(request).await
	}
}

/// Permissive CORS for browser clients.
///
/// Preflight `OPTIONS` requests are answered directly with 204. Errors from
/// inner handlers are rendered here so that they carry the CORS headers too.
pub struct CorsMiddleware {
	allow_origin: &'static str,
	allow_methods: String,
	allow_headers: &'static str,
	debug: bool,
}

impl CorsMiddleware {
	pub fn new(debug: bool) -> Self {
		let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
		Self {
			allow_origin: "*",
			allow_methods: methods.map(|m| m.to_string()).join(", "),
			allow_headers: "Content-Type, Authorization",
			debug,
		}
	}

	fn decorate(&self, response: Response) -> Response {
		response
			.with_header("Access-Control-Allow-Origin", self.allow_origin)
			.with_header("Access-Control-Allow-Methods", &self.allow_methods)
			.with_header("Access-Control-Allow-Headers", self.allow_headers)
	}
}

#[async_trait]
impl Middleware for CorsMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		if request.method == Method::OPTIONS {
			let preflight = Response::no_content()
				.with_header("Access-Control-Max-Age", "3600");
			return Ok(self.decorate(preflight));
		}
		let response = match next.handle(request).await {
			Ok(response) => response,
			Err(error) => Response::from_error(&error, self.debug),
		};
		Ok(self.decorate(response))
	}
}

/// Logs one line per request with method, path, status and latency.
pub struct RequestLoggingMiddleware;

#[async_trait]
impl Middleware for RequestLoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let method = request.method.clone();
		let path = request.path().to_string();
		let started = Instant::now();

		let result = next.handle(request).await;

		let latency_ms = started.elapsed().as_millis() as u64;
		match &result {
			Ok(response) => {
				tracing::info!(%method, %path, status = response.status.as_u16(), latency_ms, "request");
			}
			Err(error) if error.is_server_error() => {
				tracing::error!(%method, %path, status = error.status_code(), latency_ms, error = %error, "request failed");
			}
			Err(error) => {
				tracing::info!(%method, %path, status = error.status_code(), latency_ms, "request");
			}
		}
		result
	}
}

/// The stack in order, outermost first.
pub fn create_middleware_stack(state: Arc<AppState>, debug: bool) -> Vec<Arc<dyn Middleware>> {
	vec![
		Arc::new(CorsMiddleware::new(debug)),
		Arc::new(RequestLoggingMiddleware),
		Arc::new(AppContextMiddleware::new(state)),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_core::Error;
	use folio_http::MiddlewareChain;
	use hyper::StatusCode;
	use rstest::rstest;

	struct Fails;

	#[async_trait]
	impl Handler for Fails {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Err(Error::NotFound("Profile not found".into()))
		}
	}

	fn request(method: Method) -> Request {
		Request::builder()
			.method(method)
			.uri("/api/profile")
			.build()
			.unwrap()
	}

	fn cors_around_failure() -> MiddlewareChain {
		let stack: Vec<Arc<dyn Middleware>> = vec![Arc::new(CorsMiddleware::new(false))];
		MiddlewareChain::new(Arc::new(Fails), &stack)
	}

	#[rstest]
	#[tokio::test]
	async fn test_preflight_is_answered_without_routing() {
		let chain = cors_around_failure();

		let response = chain.handle(request(Method::OPTIONS)).await.unwrap();

		assert_eq!(response.status, StatusCode::NO_CONTENT);
		assert_eq!(response.headers.get("access-control-allow-origin").unwrap(), "*");
		assert!(
			response
				.headers
				.get("access-control-allow-headers")
				.unwrap()
				.to_str()
				.unwrap()
				.contains("Authorization")
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_errors_carry_cors_headers() {
		let chain = cors_around_failure();

		let response = chain.handle(request(Method::GET)).await.unwrap();

		assert_eq!(response.status, StatusCode::NOT_FOUND);
		assert_eq!(response.headers.get("access-control-allow-origin").unwrap(), "*");
		assert!(response.body_text().contains("Profile not found"));
	}
}
