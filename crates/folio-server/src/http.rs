use bytes::Bytes;
use folio_core::exception::Error;
use folio_http::{Handler, Middleware, MiddlewareChain, Request, Response};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::shutdown::ShutdownCoordinator;
use crate::timeout::TimeoutHandler;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default cap on request bodies (10 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// HTTP/1.1 server with middleware support
pub struct HttpServer {
	handler: Arc<dyn Handler>,
	middlewares: Vec<Arc<dyn Middleware>>,
	request_timeout: Option<Duration>,
	max_body_size: usize,
	debug: bool,
}

impl HttpServer {
	/// Create a new server with the given handler
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			middlewares: Vec::new(),
			request_timeout: None,
			max_body_size: DEFAULT_MAX_BODY_SIZE,
			debug: false,
		}
	}

	/// Add a middleware; the first one added is the outermost
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Bound the time spent in the wrapped handler.
	///
	/// Middleware runs outside the bound, so it still sees a timed out
	/// request as [`Error::Timeout`].
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	/// Reject request bodies over `bytes` with 413
	pub fn with_max_body_size(mut self, bytes: usize) -> Self {
		self.max_body_size = bytes;
		self
	}

	/// Expose server error details in error responses
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	/// The handler with timeout and middleware applied
	pub fn handler(&self) -> Arc<dyn Handler> {
		let mut handler = self.handler.clone();
		if let Some(timeout) = self.request_timeout {
			handler = Arc::new(TimeoutHandler::new(handler, timeout));
		}
		if !self.middlewares.is_empty() {
			handler = Arc::new(MiddlewareChain::new(handler, &self.middlewares));
		}
		handler
	}

	/// Bind `addr` and serve until the coordinator signals shutdown
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> std::io::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		self.serve(listener, coordinator).await
	}

	/// Serve connections from an already bound listener.
	///
	/// On shutdown the accept loop stops, open connections are asked to
	/// finish their current request, and the call returns once they drain
	/// or the coordinator's timeout passes.
	pub async fn serve(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> std::io::Result<()> {
		let local_addr = listener.local_addr()?;
		tracing::info!(address = %local_addr, "server listening on http://{}", local_addr);

		let handler = self.handler();
		let debug = self.debug;
		let max_body_size = self.max_body_size;
		let mut shutdown_rx = coordinator.subscribe();
		let mut connections = JoinSet::new();

		if !coordinator.is_shutting_down() {
			loop {
				tokio::select! {
					result = listener.accept() => {
						let (stream, remote_addr) = match result {
							Ok(accepted) => accepted,
							Err(e) => {
								tracing::warn!(error = %e, "failed to accept connection");
								continue;
							}
						};
						let service = RequestService {
							handler: handler.clone(),
							remote_addr,
							max_body_size,
							debug,
						};
						let conn_shutdown = coordinator.subscribe();
						connections.spawn(async move {
							if let Err(err) =
								Self::handle_connection(stream, service, conn_shutdown).await
							{
								tracing::debug!(error = %err, %remote_addr, "connection closed with error");
							}
						});
					}
					Some(_) = connections.join_next(), if !connections.is_empty() => {}
					_ = shutdown_rx.recv() => {
						tracing::info!("shutdown requested, no longer accepting connections");
						break;
					}
				}
			}
		}

		drop(listener);
		let drain = async { while connections.join_next().await.is_some() {} };
		if tokio::time::timeout(coordinator.timeout(), drain).await.is_err() {
			tracing::warn!("connections still open after drain timeout, aborting them");
			connections.abort_all();
		}

		coordinator.notify_shutdown_complete();
		Ok(())
	}

	async fn handle_connection(
		stream: TcpStream,
		service: RequestService,
		mut shutdown: tokio::sync::broadcast::Receiver<()>,
	) -> Result<(), hyper::Error> {
		let io = TokioIo::new(stream);
		let conn = http1::Builder::new().serve_connection(io, service);
		tokio::pin!(conn);

		tokio::select! {
			result = conn.as_mut() => result,
			_ = shutdown.recv() => {
				conn.as_mut().graceful_shutdown();
				conn.await
			}
		}
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
	max_body_size: usize,
	debug: bool,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = BoxError;
	type Future =
		Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;
		let max_body_size = self.max_body_size;
		let debug = self.debug;

		Box::pin(async move {
			let request = match read_request(req, remote_addr, max_body_size).await {
				Ok(request) => request,
				Err(error) => return into_hyper(Response::from_error(&error, debug)),
			};

			let response = match handler.handle(request).await {
				Ok(response) => response,
				Err(error) => {
					if error.is_server_error() {
						tracing::error!(error = %error, "request failed");
					}
					Response::from_error(&error, debug)
				}
			};
			into_hyper(response)
		})
	}
}

/// Buffers the body, refusing anything over `max_body_size`.
///
/// A declared `Content-Length` over the limit is refused before any of the
/// body is read.
async fn read_request(
	req: hyper::Request<Incoming>,
	remote_addr: SocketAddr,
	max_body_size: usize,
) -> Result<Request, Error> {
	let declared = req
		.headers()
		.get(hyper::header::CONTENT_LENGTH)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.parse::<u64>().ok());
	if declared.is_some_and(|len| len > max_body_size as u64) {
		tracing::debug!(%remote_addr, ?declared, max_body_size, "request body over limit");
		return Err(Error::PayloadTooLarge);
	}

	let (parts, body) = req.into_parts();
	let body = Limited::new(body, max_body_size)
		.collect()
		.await
		.map_err(|e| {
			if e.is::<LengthLimitError>() {
				tracing::debug!(%remote_addr, max_body_size, "request body over limit");
				Error::PayloadTooLarge
			} else {
				Error::Http(format!("failed to read request body: {e}"))
			}
		})?
		.to_bytes();

	Ok(Request::from_parts(
		parts.method,
		parts.uri,
		parts.version,
		parts.headers,
		body,
		Some(remote_addr),
	))
}

fn into_hyper(response: Response) -> Result<hyper::Response<Full<Bytes>>, BoxError> {
	let mut builder = hyper::Response::builder().status(response.status);
	for (key, value) in response.headers.iter() {
		builder = builder.header(key, value);
	}
	Ok(builder.body(Full::new(response.body))?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use folio_core::exception::{Error, Result};
	use rstest::rstest;

	struct Hello;

	#[async_trait]
	impl Handler for Hello {
		async fn handle(&self, request: Request) -> Result<Response> {
			match request.path() {
				"/boom" => Err(Error::Database("no such table: profiles".into())),
				"/echo" => Ok(Response::ok().with_body(request.body.clone())),
				"/slow" => {
					tokio::time::sleep(Duration::from_secs(2)).await;
					Ok(Response::ok())
				}
				_ => Ok(Response::ok().with_body("Hello")),
			}
		}
	}

	async fn start(server: HttpServer) -> (String, ShutdownCoordinator) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let url = format!("http://{}", listener.local_addr().unwrap());
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let server_coordinator = coordinator.clone();
		tokio::spawn(async move {
			let _ = server.serve(listener, server_coordinator).await;
		});
		(url, coordinator)
	}

	#[rstest]
	#[tokio::test]
	async fn test_serves_requests() {
		let (url, coordinator) = start(HttpServer::new(Arc::new(Hello))).await;

		let body = reqwest::get(format!("{}/", url))
			.await
			.unwrap()
			.text()
			.await
			.unwrap();

		assert_eq!(body, "Hello");
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_errors_become_json_responses() {
		let (url, coordinator) = start(HttpServer::new(Arc::new(Hello))).await;

		let response = reqwest::get(format!("{}/boom", url)).await.unwrap();

		assert_eq!(response.status().as_u16(), 500);
		let body: serde_json::Value = response.json().await.unwrap();
		assert_eq!(body["message"], "Server error");
		assert!(body.get("error").is_none());
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_request_timeout_is_503() {
		let server =
			HttpServer::new(Arc::new(Hello)).with_request_timeout(Duration::from_millis(50));
		let (url, coordinator) = start(server).await;

		let response = reqwest::get(format!("{}/slow", url)).await.unwrap();

		assert_eq!(response.status().as_u16(), 503);
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_body_within_limit_is_delivered() {
		let server = HttpServer::new(Arc::new(Hello)).with_max_body_size(1024);
		let (url, coordinator) = start(server).await;

		let response = reqwest::Client::new()
			.post(format!("{}/echo", url))
			.body("x".repeat(1024))
			.send()
			.await
			.unwrap();

		assert_eq!(response.status().as_u16(), 200);
		assert_eq!(response.text().await.unwrap().len(), 1024);
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_declared_oversized_body_is_413() {
		let server = HttpServer::new(Arc::new(Hello)).with_max_body_size(1024);
		let (url, coordinator) = start(server).await;

		let response = reqwest::Client::new()
			.post(format!("{}/echo", url))
			.body("x".repeat(4096))
			.send()
			.await
			.unwrap();

		assert_eq!(response.status().as_u16(), 413);
		let body: serde_json::Value = response.json().await.unwrap();
		assert_eq!(body["message"], "Request body too large");
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_chunked_oversized_body_is_413() {
		use tokio::io::{AsyncReadExt, AsyncWriteExt};

		let server = HttpServer::new(Arc::new(Hello)).with_max_body_size(1024);
		let (url, coordinator) = start(server).await;
		let addr = url.trim_start_matches("http://");

		let mut stream = TcpStream::connect(addr).await.unwrap();
		let chunk = "x".repeat(2048);
		let request = format!(
			"POST /echo HTTP/1.1\r\nHost: {addr}\r\nTransfer-Encoding: chunked\r\n\
			 Connection: close\r\n\r\n{:x}\r\n{chunk}\r\n0\r\n\r\n",
			chunk.len()
		);
		stream.write_all(request.as_bytes()).await.unwrap();
		let mut raw = Vec::new();
		stream.read_to_end(&mut raw).await.unwrap();

		let raw = String::from_utf8_lossy(&raw);
		assert!(raw.starts_with("HTTP/1.1 413"), "{raw}");
		coordinator.shutdown();
	}

	#[rstest]
	#[tokio::test]
	async fn test_shutdown_completes() {
		let (_url, coordinator) = start(HttpServer::new(Arc::new(Hello))).await;

		coordinator.shutdown();

		tokio::time::timeout(Duration::from_secs(2), coordinator.wait_for_shutdown())
			.await
			.unwrap();
	}
}
