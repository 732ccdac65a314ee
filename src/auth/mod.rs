pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// Any non-empty values are accepted; uniqueness is checked by `UserService`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Body returned by the register and login endpoints.
///
/// On failure `token` and `username` are `null` and `message` explains why.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub username: Option<String>,
    pub message: String,
}

impl AuthResponse {
    pub fn success(token: String, username: String, message: &str) -> Self {
        Self {
            token: Some(token),
            username: Some(username),
            message: message.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            token: None,
            username: None,
            message: message.to_string(),
        }
    }
}
