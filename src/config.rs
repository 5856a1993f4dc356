//! Project configuration: settings, logging, middleware and routing.

pub mod logging;
pub mod middleware;
pub mod settings;
pub mod urls;
pub mod views;
