//! User model, roles and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::require_field;
use crate::error::{AppError, AppResult};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "customer" => Ok(UserRole::Customer),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

// SQLx conversions: stored as TEXT
impl sqlx::Type<Postgres> for UserRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for UserRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for UserRole {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Full user record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Argon2 password hash
    #[serde(skip_serializing, default)]
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<UserRole>,
}

/// Validated registration fields; the password is still plaintext here and
/// hashed by the users service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
}

impl RegisterUser {
    pub fn validate_fields(self) -> AppResult<NewUser> {
        // Presence first, so the error names the first missing field
        if self.name.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(AppError::MissingField("name"));
        }
        if self.email.is_none() {
            return Err(AppError::MissingField("email"));
        }
        if self.password.is_none() {
            return Err(AppError::MissingField("password"));
        }
        self.validate().map_err(AppError::from_validation)?;

        let name = require_field(self.name, "name")?;
        let email = require_field(self.email, "email")?;
        let password = require_field(self.password, "password")?;

        Ok(NewUser {
            name,
            email,
            password,
            phone: self.phone,
            address: self.address,
            role: self.role.unwrap_or(UserRole::Customer),
        })
    }
}

/// Update user request (partial)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Build claims for a user with the configured expiry
    pub fn for_user(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + (expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> RegisterUser {
        RegisterUser {
            name: Some("Jane Farmer".to_string()),
            email: Some("jane@example.com".to_string()),
            password: Some("s3cret-pass".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn registration_requires_name_email_password() {
        let mut input = full_input();
        input.email = None;
        assert!(matches!(
            input.validate_fields().unwrap_err(),
            AppError::MissingField("email")
        ));

        let mut input = full_input();
        input.password = None;
        assert!(matches!(
            input.validate_fields().unwrap_err(),
            AppError::MissingField("password")
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut input = full_input();
        input.email = Some("not-an-email".to_string());
        assert!(matches!(
            input.validate_fields().unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn role_defaults_to_customer() {
        let new = full_input().validate_fields().unwrap();
        assert_eq!(new.role, UserRole::Customer);
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let user = User {
            id: 42,
            name: "Jane Farmer".to_string(),
            email: "jane@example.com".to_string(),
            password: String::new(),
            phone: None,
            address: None,
            role: UserRole::Admin,
            status: "active".to_string(),
            created_at: Utc::now(),
        };
        let claims = UserClaims::for_user(&user, 24);
        let token = claims.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, 42);
        assert!(parsed.is_admin());
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
