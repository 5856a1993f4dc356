//! URL routing for folio.
//!
//! Routes are matched by path pattern first and HTTP method second, so a
//! known path requested with the wrong method yields `405` rather than
//! `404`.
//!
//! ```rust
//! use folio_http::{Request, Response, Result};
//! use folio_urls::ServerRouter;
//!
//! async fn health(_request: Request) -> Result<Response> {
//!     Ok(Response::ok().with_body("OK"))
//! }
//!
//! let router = ServerRouter::new().get("/api/health", health);
//! assert_eq!(router.routes().len(), 1);
//! ```

pub mod handler;
pub mod pattern;
pub mod route;
pub mod router;

pub use handler::FnHandler;
pub use pattern::PathPattern;
pub use route::Route;
pub use router::ServerRouter;
