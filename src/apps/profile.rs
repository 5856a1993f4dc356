//! Profile API.

pub mod urls;
pub mod views;
