//! Handler and middleware traits.
//!
//! ## Handler
//!
//! ```rust
//! use folio_http::{Handler, Request, Response, Result};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> Result<Response> {
//!         Ok(Response::ok().with_body("Hello!"))
//!     }
//! }
//! ```
//!
//! ## Middleware
//!
//! Middleware wraps the next handler to add cross-cutting behavior:
//!
//! ```rust
//! use folio_http::{Handler, Middleware, Request, Response, Result};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct PoweredBy;
//!
//! #[async_trait]
//! impl Middleware for PoweredBy {
//!     async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
//!         let response = next.handle(request).await?;
//!         Ok(response.with_header("X-Powered-By", "folio"))
//!     }
//! }
//! ```

use async_trait::async_trait;
use folio_core::exception::Result;
use std::sync::Arc;

use crate::{Request, Response};

/// Handler trait for processing requests.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles an HTTP request and produces a response.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed.
	async fn handle(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Processes a request, usually by delegating to `next`.
	///
	/// # Errors
	///
	/// Returns an error if the middleware or next handler fails.
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

/// A handler wrapped in an ordered middleware stack.
///
/// The first middleware in the stack is the outermost one: it sees the
/// request first and the response last. Layers are linked once, when the
/// chain is built.
pub struct MiddlewareChain {
	entry: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(handler: Arc<dyn Handler>, stack: &[Arc<dyn Middleware>]) -> Self {
		let entry = stack.iter().rev().fold(handler, |next, middleware| {
			Arc::new(Layer {
				middleware: middleware.clone(),
				next,
			}) as Arc<dyn Handler>
		});
		Self { entry }
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.entry.handle(request).await
	}
}

struct Layer {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for Layer {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_core::exception::Error;
	use rstest::rstest;

	struct Page;

	#[async_trait]
	impl Handler for Page {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body("page"))
		}
	}

	/// Wraps the inner body in a tag so nesting order shows in the output.
	struct Tag(&'static str);

	#[async_trait]
	impl Middleware for Tag {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let inner = next.handle(request).await?;
			Ok(Response::ok().with_body(format!("<{0}>{1}</{0}>", self.0, inner.body_text())))
		}
	}

	struct DenyAll;

	#[async_trait]
	impl Middleware for DenyAll {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Err(Error::Authentication("No token, authorization denied".into()))
		}
	}

	fn get() -> Request {
		Request::builder().uri("/portfolio").build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_stack_calls_handler() {
		let chain = MiddlewareChain::new(Arc::new(Page), &[]);

		let response = chain.handle(get()).await.unwrap();

		assert_eq!(response.body_text(), "page");
	}

	#[rstest]
	#[tokio::test]
	async fn test_first_middleware_is_outermost() {
		let stack: Vec<Arc<dyn Middleware>> = vec![Arc::new(Tag("outer")), Arc::new(Tag("inner"))];
		let chain = MiddlewareChain::new(Arc::new(Page), &stack);

		let response = chain.handle(get()).await.unwrap();

		assert_eq!(response.body_text(), "<outer><inner>page</inner></outer>");
	}

	#[rstest]
	#[tokio::test]
	async fn test_rejection_skips_the_handler() {
		let stack: Vec<Arc<dyn Middleware>> = vec![Arc::new(Tag("outer")), Arc::new(DenyAll)];
		let chain = MiddlewareChain::new(Arc::new(Page), &stack);

		let error = chain.handle(get()).await.unwrap_err();

		assert_eq!(error.status_code(), 401);
	}
}
