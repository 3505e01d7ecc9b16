//! Categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, NewCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories with their equipment counts
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, c.description, c.created_at,
                   COUNT(e.id) AS equipment_count
            FROM categories c
            LEFT JOIN equipment e ON e.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, c.description, c.created_at,
                   COUNT(e.id) AS equipment_count
            FROM categories c
            LEFT JOIN equipment e ON e.category_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create category
    pub async fn create(&self, data: &NewCategory) -> AppResult<Category> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id).await
    }

    /// Update category
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
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
        add_field!(data.description, "description");

        let _ = idx;
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE categories SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Delete category
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }

    /// Count all categories (for stats)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
