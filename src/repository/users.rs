//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, UpdateUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by email (authentication lookup)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a user; `password_hash` is the already-hashed password
    pub async fn create(&self, data: &NewUser, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, phone, address, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(password_hash)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Update user; `password_hash` replaces the stored hash when provided
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.email, "email");
        add_field!(password_hash, "password");
        add_field!(data.phone, "phone");
        add_field!(data.address, "address");
        add_field!(data.role, "role");
        add_field!(data.status, "status");

        let _ = idx;
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE users SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(password_hash);
        bind_field!(data.phone);
        bind_field!(data.address);
        bind_field!(data.role);
        bind_field!(data.status);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Delete user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    /// Count users with the customer role (for stats)
    pub async fn count_customers(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'customer'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
