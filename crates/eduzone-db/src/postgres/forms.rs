use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{Form, FormChanges, NewForm};

use crate::error::StoreError;
use crate::repositories::FormRepository;

pub struct PgFormRepository {
    pool: PgPool,
}

impl PgFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormRepository for PgFormRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "forms"))]
    async fn list(&self) -> Result<Vec<Form>, StoreError> {
        let forms =
            sqlx::query_as::<_, Form>("SELECT * FROM forms ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(forms)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "forms"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Form>, StoreError> {
        let form = sqlx::query_as::<_, Form>("SELECT * FROM forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(form)
    }

    #[instrument(skip(self, form), fields(db.operation = "INSERT", db.table = "forms"))]
    async fn create(&self, form: NewForm) -> Result<Form, StoreError> {
        let created = sqlx::query_as::<_, Form>(
            "INSERT INTO forms (title, description, category, file_path, file_size)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.category)
        .bind(&form.file_path)
        .bind(form.file_size)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "forms"))]
    async fn update(&self, id: i64, changes: FormChanges) -> Result<Option<Form>, StoreError> {
        let updated = sqlx::query_as::<_, Form>(
            "UPDATE forms SET title = $2, description = $3, category = $4
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "forms"))]
    async fn delete(&self, id: i64) -> Result<Option<Form>, StoreError> {
        let deleted = sqlx::query_as::<_, Form>("DELETE FROM forms WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "forms"))]
    async fn record_download(&self, id: i64) -> Result<Option<Form>, StoreError> {
        let form = sqlx::query_as::<_, Form>(
            "UPDATE forms SET downloads = downloads + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(form)
    }
}
