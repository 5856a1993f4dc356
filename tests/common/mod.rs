//! Helpers shared by the API test binaries.

#![allow(dead_code)]

use folio::AppState;
use folio::config::urls::build_server;
use folio_auth::JwtAuth;
use folio_conf::ServerSettings;
use folio_profiles::SqlProfileStore;
use folio_test::{TestServerGuard, bearer, init_test_logging, test_server_guard};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const PUBLIC_BASE_URL: &str = "http://folio.test";

/// A running application backed by a private in-memory store.
pub struct TestApp {
	pub server: TestServerGuard,
	pub jwt: Arc<JwtAuth>,
	pub client: reqwest::Client,
}

impl TestApp {
	pub async fn spawn() -> Self {
		init_test_logging();
		let store = SqlProfileStore::in_memory().await.unwrap();
		let jwt = folio_test::jwt_auth();
		let state = Arc::new(AppState::new(Arc::new(store), jwt.clone(), PUBLIC_BASE_URL));
		let server = build_server(state, Duration::from_secs(5), false)
			.with_max_body_size(ServerSettings::default().max_body_bytes);
		let server = test_server_guard(server).await;
		Self {
			server,
			jwt,
			client: folio_test::http_client(),
		}
	}

	pub fn url(&self, path: &str) -> String {
		self.server.url(path)
	}

	pub fn auth(&self, user: Uuid) -> String {
		bearer(&self.jwt, user)
	}

	/// POST /api/profile as `user` with a JSON body.
	pub async fn submit(&self, user: Uuid, body: &Value) -> reqwest::Response {
		self.client
			.post(self.url("/api/profile"))
			.header("Authorization", self.auth(user))
			.json(body)
			.send()
			.await
			.unwrap()
	}

	pub async fn get(&self, path: &str) -> reqwest::Response {
		self.client.get(self.url(path)).send().await.unwrap()
	}
}
