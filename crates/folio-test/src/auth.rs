//! Token fixtures for private endpoints.

use folio_auth::JwtAuth;
use rstest::fixture;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "folio-test-secret";

/// Token codec sharing [`TEST_JWT_SECRET`] with servers built for tests.
#[fixture]
pub fn jwt_auth() -> Arc<JwtAuth> {
	Arc::new(JwtAuth::new(TEST_JWT_SECRET.as_bytes()))
}

/// `Authorization` header value for `user`.
pub fn bearer(jwt: &JwtAuth, user: Uuid) -> String {
	let token = jwt
		.generate_token(user)
		.expect("failed to sign test token");
	format!("Bearer {token}")
}
