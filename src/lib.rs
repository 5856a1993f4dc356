//! Folio: portfolio profiles served over HTTP.
//!
//! - [`apps`]: the profile API, downloads and public portfolio pages
//! - [`config`]: settings loading, logging, middleware and URL wiring
//! - [`state`]: shared application state handed to every view

pub mod apps;
pub mod config;
pub mod state;

pub use state::AppState;
