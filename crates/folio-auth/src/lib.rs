//! Access gate for private endpoints.
//!
//! Credentials are issued elsewhere; this crate only verifies HS256 bearer
//! tokens and exposes the verified user id to views.

pub mod current_user;
pub mod jwt;
pub mod middleware;

pub use current_user::CurrentUser;
pub use jwt::{AuthError, Claims, JwtAuth};
pub use middleware::JwtAuthMiddleware;
