use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{NewUser, Principal, User};
use crate::store::UserStore;

/// Credential storage and verification on top of a [`UserStore`].
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Creates an account with a bcrypt-hashed password.
    ///
    /// Fails with `BadRequest` if the username or the email is already taken.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<User, AppError> {
        if self.store.exists_by_username(username).await? {
            return Err(AppError::BadRequest("Username already exists!".into()));
        }
        if self.store.exists_by_email(email).await? {
            return Err(AppError::BadRequest("Email already exists!".into()));
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;
        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        log::info!("registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, raw_password: &str) -> Result<User, AppError> {
        let invalid = || AppError::BadRequest("Invalid username or password".into());

        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if verify_password(raw_password, &user.password_hash)? {
            Ok(user)
        } else {
            log::debug!("password mismatch for {}", username);
            Err(invalid())
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// Materializes the principal behind a verified token subject.
    pub async fn load_by_username(&self, username: &str) -> Result<Principal, AppError> {
        match self.store.find_by_username(username).await? {
            Some(user) => Ok(Principal::from_user(&user)),
            None => {
                log::warn!("token subject {} does not match any user", username);
                Err(AppError::Unauthorized("User not found".into()))
            }
        }
    }
}
