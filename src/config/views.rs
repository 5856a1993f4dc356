//! Project-level views: root and health check.

use crate::state::AppState;
use chrono::{SecondsFormat, Utc};
use folio_http::{Request, Response, Result};
use serde_json::json;

fn database_status(connected: bool) -> &'static str {
	if connected { "Connected" } else { "Disconnected" }
}

/// GET /api/health
pub async fn health_check(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let connected = state.store.ping().await;
	Response::ok().with_json(&json!({
		"status": "OK",
		"database": database_status(connected),
		"timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
	}))
}

/// GET /
pub async fn index(request: Request) -> Result<Response> {
	let state = AppState::from_request(&request)?;
	let connected = state.store.ping().await;
	Response::ok().with_json(&json!({
		"message": "Portfolio API is running",
		"database": database_status(connected),
	}))
}
