use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Failures while issuing or verifying a token
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	#[error("no bearer token supplied")]
	MissingToken,

	#[error("invalid token: {0}")]
	InvalidToken(String),

	#[error("token expired")]
	Expired,

	#[error("subject is not a user id: {0}")]
	InvalidSubject(String),

	#[error("failed to sign token: {0}")]
	Signing(String),
}

impl From<AuthError> for folio_core::Error {
	fn from(error: AuthError) -> Self {
		match error {
			AuthError::MissingToken => {
				folio_core::Error::Authentication("No token, authorization denied".to_string())
			}
			AuthError::InvalidToken(_) | AuthError::Expired | AuthError::InvalidSubject(_) => {
				folio_core::Error::Authentication("Token is not valid".to_string())
			}
			AuthError::Signing(msg) => folio_core::Error::Internal(msg),
		}
	}
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
	/// Subject (user ID). Tokens minted by older clients carry `userId`.
	#[serde(alias = "userId")]
	pub sub: String,
	pub exp: i64,
	pub iat: i64,
}

impl Claims {
	/// Creates claims for a user, valid for `expires_in`.
	///
	/// # Examples
	///
	/// ```
	/// use folio_auth::Claims;
	/// use chrono::Duration;
	/// use uuid::Uuid;
	///
	/// let user = Uuid::new_v4();
	/// let claims = Claims::new(user, Duration::hours(24));
	///
	/// assert_eq!(claims.sub, user.to_string());
	/// assert!(claims.exp > claims.iat);
	/// assert!(!claims.is_expired());
	/// ```
	pub fn new(user_id: Uuid, expires_in: Duration) -> Self {
		let now = Utc::now();
		Self {
			sub: user_id.to_string(),
			iat: now.timestamp(),
			exp: (now + expires_in).timestamp(),
		}
	}

	pub fn is_expired(&self) -> bool {
		Utc::now().timestamp() > self.exp
	}

	/// The subject as a user id
	pub fn user_id(&self) -> Result<Uuid, AuthError> {
		Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidSubject(self.sub.clone()))
	}
}

/// HS256 token issuer and verifier
pub struct JwtAuth {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	ttl: Duration,
}

impl JwtAuth {
	/// Creates a new JWT authentication handler with the given secret key.
	///
	/// Generated tokens are valid for 24 hours unless changed with
	/// [`JwtAuth::with_ttl`].
	pub fn new(secret: &[u8]) -> Self {
		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation: Validation::default(),
			ttl: Duration::hours(24),
		}
	}

	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
		encode(&Header::default(), claims, &self.encoding_key)
			.map_err(|e| AuthError::Signing(e.to_string()))
	}

	/// Decodes a token, checking its signature and expiry.
	pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
		decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map(|data| data.claims)
			.map_err(|e| match e.kind() {
				jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
				_ => AuthError::InvalidToken(e.to_string()),
			})
	}

	/// Generates a token for the given user.
	///
	/// # Examples
	///
	/// ```
	/// use folio_auth::JwtAuth;
	/// use uuid::Uuid;
	///
	/// let jwt_auth = JwtAuth::new(b"secret");
	/// let user = Uuid::new_v4();
	/// let token = jwt_auth.generate_token(user).unwrap();
	///
	/// assert_eq!(jwt_auth.verify_token(&token).unwrap(), user);
	/// ```
	pub fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError> {
		self.encode(&Claims::new(user_id, self.ttl))
	}

	/// Verifies a token and returns the user id it was issued for.
	pub fn verify_token(&self, token: &str) -> Result<Uuid, AuthError> {
		let claims = self.decode(token)?;
		if claims.is_expired() {
			return Err(AuthError::Expired);
		}
		claims.user_id()
	}
}
