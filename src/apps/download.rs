//! Portfolio downloads.

pub mod urls;
pub mod views;
