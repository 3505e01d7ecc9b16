//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, UpdateUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by email and password, returning the user and a JWT.
    /// The failure message never distinguishes an unknown email from a wrong
    /// password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let invalid = || AppError::Authentication("Invalid email or password".to_string());

        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !self.verify_password(&user, password)? {
            return Err(invalid());
        }

        let claims = UserClaims::for_user(&user, self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }

    /// Register a new user (customer by default)
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let new = input.validate_fields()?;

        if self.repository.users.email_exists(&new.email, None).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let hash = self.hash_password(&new.password)?;
        self.repository.users.create(&new, &hash).await
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        data.validate().map_err(AppError::from_validation)?;

        if let Some(ref email) = data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }

        let password_hash = match data.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        self.repository.users.update(id, &data, password_hash).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Verify a password against the stored Argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2 with a fresh salt
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
