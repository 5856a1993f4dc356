use folio_auth::JwtAuth;
use folio_conf::Settings;
use folio_core::Error;
use folio_http::Request;
use folio_profiles::{ProfileStore, ThemeProjector};
use std::sync::Arc;

/// Everything a view needs besides the request itself.
pub struct AppState {
	pub store: Arc<dyn ProfileStore>,
	pub jwt: Arc<JwtAuth>,
	pub projector: ThemeProjector,
	/// Base URL used for links back to the public portfolio pages
	pub public_base_url: String,
}

impl AppState {
	pub fn new(
		store: Arc<dyn ProfileStore>,
		jwt: Arc<JwtAuth>,
		public_base_url: impl Into<String>,
	) -> Self {
		Self {
			store,
			jwt,
			projector: ThemeProjector::new(),
			public_base_url: public_base_url.into(),
		}
	}

	/// State built from loaded settings around an opened store.
	pub fn from_settings(settings: &Settings, store: Arc<dyn ProfileStore>) -> Self {
		let jwt = JwtAuth::new(settings.auth.jwt_secret.as_bytes())
			.with_ttl(chrono::Duration::hours(settings.auth.token_ttl_hours));
		Self::new(store, Arc::new(jwt), settings.site.public_base_url.clone())
	}

	/// The state injected by
	/// [`AppContextMiddleware`](crate::config::middleware::AppContextMiddleware).
	pub fn from_request(request: &Request) -> Result<Arc<Self>, Error> {
		request
			.extensions
			.get::<Arc<Self>>()
			.ok_or_else(|| Error::Internal("application state missing from request".to_string()))
	}
}
