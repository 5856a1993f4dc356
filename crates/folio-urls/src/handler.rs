//! Adapter that turns an async function into a [`Handler`].

use async_trait::async_trait;
use folio_http::{Handler, Request, Response, Result};
use std::future::Future;
use std::marker::PhantomData;

/// Wraps `async fn(Request) -> Result<Response>` so it can be routed.
///
/// # Examples
///
/// ```
/// use folio_http::{Handler, Request, Response, Result};
/// use folio_urls::FnHandler;
///
/// async fn ping(_request: Request) -> Result<Response> {
///     Ok(Response::ok().with_body("pong"))
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let handler = FnHandler::new(ping);
/// let request = Request::builder().uri("/ping").build().unwrap();
/// let response = handler.handle(request).await.unwrap();
/// assert_eq!(response.body_text(), "pong");
/// # });
/// ```
pub struct FnHandler<F, Fut> {
	func: F,
	_future: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnHandler<F, Fut>
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	pub fn new(func: F) -> Self {
		Self {
			func,
			_future: PhantomData,
		}
	}
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F, Fut>
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.func)(request).await
	}
}
