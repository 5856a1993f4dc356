//! Test fixtures for folio.
//!
//! - [`TestServerGuard`]: a real server on a random port, shut down on drop
//! - [`memory_store`]: an isolated in-memory profile store
//! - [`jwt_auth`] and [`bearer`]: tokens for private endpoints

pub mod auth;
pub mod logging;
pub mod server;
pub mod store;

pub use auth::{TEST_JWT_SECRET, bearer, jwt_auth};
pub use logging::init_test_logging;
pub use server::{TestServerGuard, http_client, test_server_guard};
pub use store::memory_store;
