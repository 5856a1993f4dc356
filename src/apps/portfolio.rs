//! Public portfolio pages.

pub mod urls;
pub mod views;
