use anyhow::{Context, anyhow};
use tracing::{info, instrument, warn};

use eduzone_core::AppError;
use eduzone_db::Repositories;
use eduzone_models::{
    CreateFeedbackDto, Feedback, FeedbackStatus, NewFeedback, UpdateFeedbackStatusDto,
};

use crate::middleware::auth::AuthUser;
use crate::validator::validated;

pub struct FeedbackService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Feedback not found"))
}

impl FeedbackService {
    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "feedback"))]
    pub async fn list_feedback(repos: &Repositories) -> Result<Vec<Feedback>, AppError> {
        Ok(repos
            .feedback
            .list()
            .await
            .context("Error fetching feedback")?)
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "feedback"))]
    pub async fn get_feedback(repos: &Repositories, id: i64) -> Result<Feedback, AppError> {
        repos
            .feedback
            .find_by_id(id)
            .await
            .context("Error fetching feedback")?
            .ok_or_else(not_found)
    }

    /// Records feedback on behalf of the caller. The author id always comes from the
    /// token; the display name may be given in the body and otherwise is the account name.
    #[instrument(skip(repos, author, dto), fields(db.operation = "INSERT", db.table = "feedback", user.id = author.user_id()))]
    pub async fn create_feedback(
        repos: &Repositories,
        author: &AuthUser,
        dto: CreateFeedbackDto,
    ) -> Result<Feedback, AppError> {
        let (feedback_type, text, given_name) =
            validated(dto, |dto| Some((dto.feedback_type?, dto.text?, dto.user_name)))?;

        let user_name = match given_name {
            Some(name) => name,
            None => repos
                .users
                .find_by_id(author.user_id())
                .await
                .context("Error submitting feedback")?
                .map(|user| user.name)
                .unwrap_or_else(|| author.email().to_string()),
        };

        let feedback = repos
            .feedback
            .create(NewFeedback {
                feedback_type,
                text,
                user_id: Some(author.user_id()),
                user_name: Some(user_name),
            })
            .await
            .context("Error submitting feedback")?;

        info!(feedback.id = feedback.id, "Feedback submitted");
        Ok(feedback)
    }

    /// Moves feedback between statuses. `Pending -> Reviewed` is the only real
    /// transition; repeating it is a no-op and going back is refused.
    #[instrument(skip(repos, dto), fields(db.operation = "UPDATE", db.table = "feedback"))]
    pub async fn update_status(
        repos: &Repositories,
        id: i64,
        dto: UpdateFeedbackStatusDto,
    ) -> Result<Feedback, AppError> {
        let raw = validated(dto, |dto| dto.status)?;
        let status: FeedbackStatus = raw
            .parse()
            .map_err(|message: String| AppError::bad_request(anyhow!(message)))?;

        if let Some(feedback) = repos
            .feedback
            .set_status(id, status)
            .await
            .context("Error updating feedback status")?
        {
            info!(feedback.id = id, status = %status, "Feedback status updated");
            return Ok(feedback);
        }

        let current = Self::get_feedback(repos, id).await?;
        warn!(
            feedback.id = id,
            from = %current.status,
            to = %status,
            "Refused feedback status transition"
        );
        Err(AppError::bad_request(anyhow!(
            "Cannot change status from {} to {}",
            current.status,
            status
        )))
    }

    #[instrument(skip(repos), fields(db.operation = "DELETE", db.table = "feedback"))]
    pub async fn delete_feedback(repos: &Repositories, id: i64) -> Result<(), AppError> {
        if !repos
            .feedback
            .delete(id)
            .await
            .context("Error deleting feedback")?
        {
            return Err(not_found());
        }

        info!(feedback.id = id, "Feedback deleted");
        Ok(())
    }
}
