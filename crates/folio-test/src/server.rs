//! Running-server fixtures with automatic graceful shutdown.

use folio_server::{HttpServer, ShutdownCoordinator};
use rstest::fixture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server bound to a random local port.
///
/// Dropping the guard signals shutdown and aborts the server task, so a
/// panicking test still releases the port.
///
/// # Examples
///
/// ```no_run
/// use folio_http::{Handler, Request, Response, Result};
/// use folio_server::HttpServer;
/// use folio_test::test_server_guard;
/// use std::sync::Arc;
///
/// struct Hello;
///
/// #[async_trait::async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok().with_body("hello"))
///     }
/// }
///
/// # async fn example() {
/// let server = test_server_guard(HttpServer::new(Arc::new(Hello))).await;
/// let body = reqwest::get(server.url("/")).await.unwrap().text().await.unwrap();
/// assert_eq!(body, "hello");
/// # }
/// ```
pub struct TestServerGuard {
	/// Base URL, e.g. `http://127.0.0.1:49152`
	pub base_url: String,
	pub addr: SocketAddr,
	pub coordinator: ShutdownCoordinator,
	server_task: Option<JoinHandle<()>>,
}

impl TestServerGuard {
	/// Binds `127.0.0.1:0` and serves `server` on it.
	///
	/// The listener is bound before the task is spawned, so requests can be
	/// sent as soon as this returns.
	pub async fn start(server: HttpServer) -> std::io::Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));

		let server_coordinator = coordinator.clone();
		let server_task = tokio::spawn(async move {
			let _ = server.serve(listener, server_coordinator).await;
		});

		Ok(Self {
			base_url: format!("http://{addr}"),
			addr,
			coordinator,
			server_task: Some(server_task),
		})
	}

	/// Absolute URL for `path` on this server.
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Shuts down and waits for open connections to drain.
	pub async fn shutdown(mut self) {
		self.coordinator.shutdown();
		if let Some(task) = self.server_task.take() {
			let _ = task.await;
		}
	}
}

impl Drop for TestServerGuard {
	fn drop(&mut self) {
		self.coordinator.shutdown();
		if let Some(task) = self.server_task.take() {
			task.abort();
		}
	}
}

/// Starts `server` on a random port.
///
/// Panics if no local port can be bound, which only happens in a broken
/// test environment.
pub async fn test_server_guard(server: HttpServer) -> TestServerGuard {
	TestServerGuard::start(server)
		.await
		.expect("failed to bind test server")
}

/// HTTP client with a short timeout, no redirects followed.
#[fixture]
pub fn http_client() -> reqwest::Client {
	reqwest::Client::builder()
		.timeout(Duration::from_secs(10))
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.expect("failed to create HTTP client")
}
