use async_trait::async_trait;
use folio_core::exception::Error;
use folio_http::{Handler, Request, Response, Result};
use std::sync::Arc;
use std::time::Duration;

/// Fails requests that take longer than `timeout` with [`Error::Timeout`].
///
/// # Examples
///
/// ```
/// use folio_http::{Handler, Request, Response, Result};
/// use folio_server::TimeoutHandler;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct Slow;
///
/// #[async_trait::async_trait]
/// impl Handler for Slow {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         tokio::time::sleep(Duration::from_secs(5)).await;
///         Ok(Response::ok())
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let handler = TimeoutHandler::new(Arc::new(Slow), Duration::from_millis(10));
/// let error = handler.handle(Request::builder().build().unwrap()).await.unwrap_err();
/// assert_eq!(error.status_code(), 503);
/// # });
/// ```
pub struct TimeoutHandler {
	inner: Arc<dyn Handler>,
	timeout: Duration,
}

impl TimeoutHandler {
	pub fn new(inner: Arc<dyn Handler>, timeout: Duration) -> Self {
		Self { inner, timeout }
	}
}

#[async_trait]
impl Handler for TimeoutHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let method = request.method.clone();
		let path = request.path().to_string();
		match tokio::time::timeout(self.timeout, self.inner.handle(request)).await {
			Ok(result) => result,
			Err(_) => {
				tracing::warn!(%method, %path, timeout = ?self.timeout, "request timed out");
				Err(Error::Timeout)
			}
		}
	}
}
