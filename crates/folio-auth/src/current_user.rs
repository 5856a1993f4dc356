use folio_core::Error;
use folio_http::{AuthState, Request};
use uuid::Uuid;

/// The user verified by [`JwtAuthMiddleware`](crate::JwtAuthMiddleware).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
	user_id: Uuid,
}

impl CurrentUser {
	/// Extract the verified user from the request.
	///
	/// # Errors
	///
	/// Returns [`Error::Authentication`] when the route was not guarded or
	/// the stored identity is not a user id.
	///
	/// # Examples
	///
	/// ```
	/// use folio_auth::CurrentUser;
	/// use folio_http::{AuthState, Request};
	/// use uuid::Uuid;
	///
	/// let user = Uuid::new_v4();
	/// let request = Request::builder().build().unwrap();
	/// assert!(CurrentUser::from_request(&request).is_err());
	///
	/// request.extensions.insert(AuthState::authenticated(user.to_string()));
	/// assert_eq!(CurrentUser::from_request(&request).unwrap().id(), user);
	/// ```
	pub fn from_request(request: &Request) -> Result<Self, Error> {
		let denied = || Error::Authentication("No token, authorization denied".to_string());
		let state: AuthState = request.extensions.get().ok_or_else(denied)?;
		if !state.is_authenticated {
			return Err(denied());
		}
		let user_id = Uuid::parse_str(&state.user_id)
			.map_err(|_| Error::Authentication("Token is not valid".to_string()))?;
		Ok(Self { user_id })
	}

	pub fn id(&self) -> Uuid {
		self.user_id
	}
}
