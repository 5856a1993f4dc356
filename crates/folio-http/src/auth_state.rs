//! Authentication state stored in request extensions.

/// Verified identity of the caller.
///
/// Authentication middleware inserts this into the request extensions
/// once a credential has been checked; handlers read it back through
/// `CurrentUser` or directly.
///
/// # Examples
///
/// ```
/// use folio_http::{AuthState, Extensions};
///
/// let extensions = Extensions::new();
/// extensions.insert(AuthState::authenticated("7b5f6c1e-0000-0000-0000-000000000000"));
///
/// let state: AuthState = extensions.get().unwrap();
/// assert!(state.is_authenticated);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
	/// The authenticated user's ID, as carried by the credential
	pub user_id: String,
	pub is_authenticated: bool,
}

impl AuthState {
	/// Creates a new authenticated state.
	pub fn authenticated(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			is_authenticated: true,
		}
	}
}
