//! Core types shared by every folio crate.
//!
//! Only the exception taxonomy lives here so that domain crates can
//! report errors without depending on the HTTP layer.

pub mod exception;

pub use exception::{Error, FieldError, Result};
