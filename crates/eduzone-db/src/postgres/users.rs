use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{NewUser, User, UserRole, UserUpdate};

use crate::error::StoreError;
use crate::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 ORDER BY name ASC, id ASC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(db.operation = "INSERT", db.table = "users"))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role, phone, position, department, bio, image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.profile.phone)
        .bind(&user.profile.position)
        .bind(&user.profile.department)
        .bind(&user.profile.bio)
        .bind(&user.profile.image_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "users"))]
    async fn update(
        &self,
        id: i64,
        only_role: Option<UserRole>,
        changes: UserUpdate,
    ) -> Result<Option<User>, StoreError> {
        let updated = sqlx::query_as::<_, User>(
            "UPDATE users
             SET name = $3, email = $4, password = COALESCE($5, password),
                 phone = $6, position = $7, department = $8, bio = $9, image_path = $10
             WHERE id = $1 AND ($2::user_role IS NULL OR role = $2)
             RETURNING *",
        )
        .bind(id)
        .bind(only_role)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(&changes.profile.phone)
        .bind(&changes.profile.position)
        .bind(&changes.profile.department)
        .bind(&changes.profile.bio)
        .bind(&changes.profile.image_path)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "users"))]
    async fn delete(&self, id: i64, only_role: Option<UserRole>) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM users WHERE id = $1 AND ($2::user_role IS NULL OR role = $2)")
                .bind(id)
                .bind(only_role)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
