//! Equipment repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentQuery, NewEquipment, UpdateEquipment},
};

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT e.id, e.name, e.model_number, e.category_id, c.name AS category_name,
           e.hourly_rate, e.daily_rate, e.description, e.image, e.status, e.created_at
    FROM equipment e
    LEFT JOIN categories c ON e.category_id = c.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, optionally filtered by category and status
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.category_id.is_some() {
            conditions.push(format!("e.category_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("e.status = ${}", idx));
            idx += 1;
        }
        let _ = idx;

        let mut sql = SELECT_WITH_CATEGORY.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY e.name");

        let mut builder = sqlx::query_as::<_, Equipment>(&sql);
        if let Some(category_id) = query.category_id {
            builder = builder.bind(category_id);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let sql = format!("{} WHERE e.id = $1", SELECT_WITH_CATEGORY);
        sqlx::query_as::<_, Equipment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment with the resolved image path
    pub async fn create(&self, data: &NewEquipment, image: &str) -> AppResult<Equipment> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO equipment
                (name, model_number, category_id, hourly_rate, daily_rate, description, image, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.model_number)
        .bind(data.category_id)
        .bind(data.hourly_rate)
        .bind(data.daily_rate)
        .bind(&data.description)
        .bind(image)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id).await
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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
        add_field!(data.model_number, "model_number");
        add_field!(data.category_id, "category_id");
        add_field!(data.hourly_rate, "hourly_rate");
        add_field!(data.daily_rate, "daily_rate");
        add_field!(data.description, "description");
        add_field!(data.status, "status");
        add_field!(data.image, "image");

        let _ = idx;
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE equipment SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.model_number);
        bind_field!(data.category_id);
        bind_field!(data.hourly_rate);
        bind_field!(data.daily_rate);
        bind_field!(data.description);
        bind_field!(data.status);
        bind_field!(data.image);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Delete equipment, returning the stored image path for file cleanup
    pub async fn delete(&self, id: i32) -> AppResult<String> {
        let image: Option<String> =
            sqlx::query_scalar("DELETE FROM equipment WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        image.ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Count equipment, optionally restricted to one status (for stats)
    pub async fn count(&self, status: Option<&str>) -> AppResult<i64> {
        let count: i64 = if let Some(status) = status {
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
                .fetch_one(&self.pool)
                .await?
        };
        Ok(count)
    }
}
