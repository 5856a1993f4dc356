//! HTTP primitives for folio.
//!
//! This crate provides the request and response types that flow through
//! the server, together with the [`Handler`] and [`Middleware`] traits used
//! to compose request processing.

pub mod auth_state;
pub mod extensions;
pub mod middleware;
pub mod request;
pub mod response;

pub use auth_state::AuthState;
pub use extensions::Extensions;
pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use folio_core::exception::{Error, FieldError, Result};
