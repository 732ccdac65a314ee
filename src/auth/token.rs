use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// HS256 needs at least 256 bits of key material.
pub const MIN_SECRET_LEN: usize = 32;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the username.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed, time-bounded identity tokens.
///
/// Built once at startup from the configured secret and lifetime and shared
/// through `web::Data`. There is no revocation list and no refresh flow: a
/// token is valid until it expires.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    /// Creates a token service for `secret`.
    ///
    /// Returns `AppError::Configuration` if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes, or the lifetime is not positive or too large
    /// to compute an expiry from.
    pub fn new(secret: &str, lifetime: Duration) -> Result<Self, AppError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Configuration(format!(
                "JWT_SECRET must be at least {} bytes long",
                MIN_SECRET_LEN
            )));
        }
        if lifetime <= Duration::zero() {
            return Err(AppError::Configuration(
                "JWT_EXPIRATION_MS must be positive".into(),
            ));
        }
        if Utc::now().checked_add_signed(lifetime).is_none() {
            return Err(AppError::Configuration(
                "JWT_EXPIRATION_MS is too large".into(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        })
    }

    /// Generates a JWT whose subject is `username`.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT string and decodes its claims.
    ///
    /// Bad signatures, malformed tokens and expired tokens all yield the same
    /// `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
