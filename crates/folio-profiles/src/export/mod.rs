//! Downloadable exports of a profile.
//!
//! Both exports are pure functions of an already-fetched [`Profile`](crate::Profile);
//! fetching, and therefore the not-found case, happens before them.

mod filename;
mod html;
mod json;

pub use filename::{ExportFormat, content_disposition, download_filename};
pub use html::{render_html, view_online_url};
pub use json::JsonExport;
