//! Graceful shutdown coordination.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Coordinates shutdown between the signal handler, the accept loop and
/// open connections.
///
/// Cloning is cheap; all clones observe the same shutdown.
///
/// # Examples
///
/// ```
/// use folio_server::ShutdownCoordinator;
/// use std::time::Duration;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
/// let mut rx = coordinator.subscribe();
///
/// coordinator.shutdown();
/// assert!(rx.recv().await.is_ok());
/// assert!(coordinator.is_shutting_down());
/// # });
/// ```
#[derive(Clone)]
pub struct ShutdownCoordinator {
	shutdown_tx: broadcast::Sender<()>,
	requested: Arc<AtomicBool>,
	complete_tx: Arc<watch::Sender<bool>>,
	timeout: Duration,
}

impl ShutdownCoordinator {
	/// `timeout` bounds how long in-flight connections may take to drain
	pub fn new(timeout: Duration) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		let (complete_tx, _) = watch::channel(false);
		Self {
			shutdown_tx,
			requested: Arc::new(AtomicBool::new(false)),
			complete_tx: Arc::new(complete_tx),
			timeout,
		}
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.shutdown_tx.subscribe()
	}

	/// Ask the server to stop accepting connections
	pub fn shutdown(&self) {
		self.requested.store(true, Ordering::SeqCst);
		// No receivers just means the server is not running yet
		let _ = self.shutdown_tx.send(());
	}

	pub fn is_shutting_down(&self) -> bool {
		self.requested.load(Ordering::SeqCst)
	}

	/// Called by the server once connections have drained
	pub fn notify_shutdown_complete(&self) {
		self.complete_tx.send_replace(true);
	}

	/// Wait until the server reports completion, or the drain timeout passes
	pub async fn wait_for_shutdown(&self) {
		let mut rx = self.complete_tx.subscribe();
		let wait = rx.wait_for(|complete| *complete);
		if tokio::time::timeout(self.timeout, wait).await.is_err() {
			tracing::warn!(timeout = ?self.timeout, "graceful shutdown timed out");
		}
	}
}

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_every_subscriber_is_notified() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
		let mut first = coordinator.subscribe();
		let mut second = coordinator.clone().subscribe();

		coordinator.shutdown();

		assert!(first.recv().await.is_ok());
		assert!(second.recv().await.is_ok());
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_returns_after_completion() {
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
		let server_side = coordinator.clone();

		tokio::spawn(async move {
			server_side.notify_shutdown_complete();
		});

		tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_shutdown())
			.await
			.unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_wait_gives_up_after_timeout() {
		let coordinator = ShutdownCoordinator::new(Duration::from_millis(20));

		tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_shutdown())
			.await
			.unwrap();
	}
}
