//! HTTP server for folio, built on hyper.
//!
//! ## Basic Usage
//!
//! ```rust,ignore
//! use folio_server::{HttpServer, ShutdownCoordinator, shutdown_signal};
//! use std::time::Duration;
//!
//! let coordinator = ShutdownCoordinator::new(Duration::from_secs(30));
//! let trigger = coordinator.clone();
//! tokio::spawn(async move {
//!     shutdown_signal().await;
//!     trigger.shutdown();
//! });
//!
//! HttpServer::new(handler)
//!     .listen_with_shutdown("127.0.0.1:8000".parse()?, coordinator)
//!     .await?;
//! ```

pub mod http;
pub mod shutdown;
pub mod timeout;

pub use http::HttpServer;
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
pub use timeout::TimeoutHandler;
