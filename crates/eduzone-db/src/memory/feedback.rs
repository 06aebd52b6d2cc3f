use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{Feedback, FeedbackStatus, NewFeedback};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::FeedbackRepository;

pub struct MemoryFeedbackRepository {
    db: MemoryDatabase,
}

impl MemoryFeedbackRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let mut feedback = self.db.read().await.feedback.select(|_| true);
        feedback.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(feedback)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>, StoreError> {
        Ok(self.db.read().await.feedback.get(id))
    }

    async fn create(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.feedback.insert_with(|id| Feedback {
            id,
            feedback_type: feedback.feedback_type,
            text: feedback.text,
            user_id: feedback.user_id,
            user_name: feedback.user_name,
            status: FeedbackStatus::Pending,
            created_at: Utc::now(),
        }))
    }

    async fn set_status(
        &self,
        id: i64,
        status: FeedbackStatus,
    ) -> Result<Option<Feedback>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.feedback.update_where(
            id,
            |row| row.status.can_transition_to(status),
            |row| row.status = status,
        ))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.feedback.remove_where(id, |_| true).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reviewed_cannot_return_to_pending() {
        let repo = MemoryFeedbackRepository::new(MemoryDatabase::default());
        let feedback = repo
            .create(NewFeedback {
                feedback_type: "complaint".into(),
                text: "Bus was late".into(),
                user_id: None,
                user_name: None,
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
        assert_eq!(
            repo.find_by_id(feedback.id).await.unwrap().unwrap().status,
            FeedbackStatus::Reviewed
        );
    }
}
