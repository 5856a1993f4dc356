use async_trait::async_trait;
use folio_http::{AuthState, Handler, Middleware, Request, Response, Result};
use std::sync::Arc;

use crate::{AuthError, JwtAuth};

/// Rejects requests without a valid bearer token.
///
/// On success the verified user id is stored as an [`AuthState`] in the
/// request extensions.
pub struct JwtAuthMiddleware {
	jwt: Arc<JwtAuth>,
}

impl JwtAuthMiddleware {
	pub fn new(jwt: Arc<JwtAuth>) -> Self {
		Self { jwt }
	}

	fn authenticate(&self, request: &Request) -> std::result::Result<AuthState, AuthError> {
		let token = request.bearer_token().ok_or(AuthError::MissingToken)?;
		let user_id = self.jwt.verify_token(token)?;
		Ok(AuthState::authenticated(user_id.to_string()))
	}
}

#[async_trait]
impl Middleware for JwtAuthMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		match self.authenticate(&request) {
			Ok(state) => {
				request.extensions.insert(state);
				next.handle(request).await
			}
			Err(error) => {
				tracing::debug!(path = %request.path(), error = %error, "rejected request");
				Err(error.into())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::CurrentUser;
	use rstest::{fixture, rstest};
	use uuid::Uuid;

	struct WhoAmI;

	#[async_trait]
	impl Handler for WhoAmI {
		async fn handle(&self, request: Request) -> Result<Response> {
			let user = CurrentUser::from_request(&request)?;
			Ok(Response::ok().with_body(user.id().to_string()))
		}
	}

	#[fixture]
	fn jwt() -> Arc<JwtAuth> {
		Arc::new(JwtAuth::new(b"test-secret"))
	}

	fn request_with(header: Option<String>) -> Request {
		let mut builder = Request::builder().uri("/api/profile");
		if let Some(value) = header {
			builder = builder.header("authorization", &value);
		}
		builder.build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_valid_token_reaches_handler(jwt: Arc<JwtAuth>) {
		let user = Uuid::new_v4();
		let token = jwt.generate_token(user).unwrap();
		let middleware = JwtAuthMiddleware::new(jwt);

		let response = middleware
			.process(request_with(Some(format!("Bearer {}", token))), Arc::new(WhoAmI))
			.await
			.unwrap();

		assert_eq!(response.body_text(), user.to_string());
	}

	#[rstest]
	#[case(None, "No token, authorization denied")]
	#[case(Some("Bearer not.a.jwt".to_string()), "Token is not valid")]
	#[tokio::test]
	async fn test_rejections(
		jwt: Arc<JwtAuth>,
		#[case] header: Option<String>,
		#[case] message: &str,
	) {
		let middleware = JwtAuthMiddleware::new(jwt);

		let error = middleware
			.process(request_with(header), Arc::new(WhoAmI))
			.await
			.unwrap_err();

		assert_eq!(error.status_code(), 401);
		assert_eq!(error.to_body(false)["message"], message);
	}
}
