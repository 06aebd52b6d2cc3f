use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{Feedback, FeedbackStatus, NewFeedback};

use crate::error::StoreError;
use crate::repositories::FeedbackRepository;

pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "feedback"))]
    async fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(feedback)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "feedback"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>, StoreError> {
        let feedback = sqlx::query_as::<_, Feedback>("SELECT * FROM feedback WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feedback)
    }

    #[instrument(skip(self, feedback), fields(db.operation = "INSERT", db.table = "feedback"))]
    async fn create(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let created = sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (feedback_type, text, user_id, user_name)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&feedback.feedback_type)
        .bind(&feedback.text)
        .bind(feedback.user_id)
        .bind(&feedback.user_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "feedback"))]
    async fn set_status(
        &self,
        id: i64,
        status: FeedbackStatus,
    ) -> Result<Option<Feedback>, StoreError> {
        // Pending may move anywhere; any status may be re-applied to itself
        let updated = sqlx::query_as::<_, Feedback>(
            "UPDATE feedback SET status = $2
             WHERE id = $1 AND (status = 'Pending' OR status = $2)
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "feedback"))]
    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_status_is_one_way(pool: PgPool) {
        let repo = PgFeedbackRepository::new(pool);
        let feedback = repo
            .create(NewFeedback {
                feedback_type: "suggestion".into(),
                text: "More library hours".into(),
                user_id: Some(1),
                user_name: Some("Parent".into()),
            })
            .await
            .unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Pending);

        let reviewed = repo
            .set_status(feedback.id, FeedbackStatus::Reviewed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, FeedbackStatus::Reviewed);

        assert!(repo
            .set_status(feedback.id, FeedbackStatus::Reviewed)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .set_status(feedback.id, FeedbackStatus::Pending)
            .await
            .unwrap()
            .is_none());
    }
}
