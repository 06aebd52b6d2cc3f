use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{NewTeacher, Teacher};

use crate::error::StoreError;
use crate::repositories::TeacherRepository;

pub struct PgTeacherRepository {
    pool: PgPool,
}

impl PgTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "teachers"))]
    async fn list(&self) -> Result<Vec<Teacher>, StoreError> {
        let teachers =
            sqlx::query_as::<_, Teacher>("SELECT * FROM teachers ORDER BY name ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(teachers)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "teachers"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    #[instrument(skip(self, teacher), fields(db.operation = "INSERT", db.table = "teachers"))]
    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, StoreError> {
        let created = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (name, subject, email, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&teacher.name)
        .bind(&teacher.subject)
        .bind(&teacher.email)
        .bind(&teacher.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self, teacher), fields(db.operation = "UPDATE", db.table = "teachers"))]
    async fn update(&self, id: i64, teacher: NewTeacher) -> Result<Option<Teacher>, StoreError> {
        let updated = sqlx::query_as::<_, Teacher>(
            "UPDATE teachers SET name = $2, subject = $3, email = $4, phone = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&teacher.name)
        .bind(&teacher.subject)
        .bind(&teacher.email)
        .bind(&teacher.phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "teachers"))]
    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
