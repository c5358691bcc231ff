pub mod extractors;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};

use crate::models::PublicUser;

// Re-export necessary items
pub use extractors::{authenticate, AuthenticatedUser, Rejection};
pub use password::PasswordScheme;
pub use service::{AuthError, AuthOutcome, AuthService};
pub use token::{Claims, Identity, TokenCodec, TokenError};

/// Represents the payload for a user login request.
///
/// Any JSON object decodes; absent fields are empty strings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// The fields are stored as given, absent ones as empty strings. Only email uniqueness
/// is enforced, by the repository.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response body after a successful login or registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub user: PublicUser,
    pub user_id: i32,
    pub message: String,
}

impl AuthResponse {
    pub fn new(outcome: AuthOutcome, message: &str) -> Self {
        Self {
            token: outcome.token,
            user_id: outcome.user.id,
            user: outcome.user,
            message: message.to_string(),
        }
    }
}
