use axum::{extract::State, http::StatusCode};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::{CreateFeedbackDto, Feedback, UpdateFeedbackStatusDto};

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::service::FeedbackService;

#[utoipa::path(
    get,
    path = "/api/feedback",
    responses(
        (status = 200, description = "All feedback, newest first", body = [Feedback]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
pub async fn get_all_feedback(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
) -> Result<ApiResponse<Vec<Feedback>>, AppError> {
    let feedback = FeedbackService::list_feedback(&state.repos).await?;
    Ok(ApiResponse::new(feedback))
}

#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    params(
        ("id" = i64, Path, description = "Feedback ID")
    ),
    responses(
        (status = 200, description = "Feedback details", body = Feedback),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
pub async fn get_feedback(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
) -> Result<ApiResponse<Feedback>, AppError> {
    let feedback = FeedbackService::get_feedback(&state.repos, id).await?;
    Ok(ApiResponse::new(feedback))
}

#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback submitted with status Pending", body = Feedback),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeedbackDto>,
) -> Result<(StatusCode, ApiResponse<Feedback>), AppError> {
    let feedback = FeedbackService::create_feedback(&state.repos, &auth_user, dto).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(feedback)))
}

#[utoipa::path(
    put,
    path = "/api/feedback/{id}/status",
    params(
        ("id" = i64, Path, description = "Feedback ID")
    ),
    request_body = UpdateFeedbackStatusDto,
    responses(
        (status = 200, description = "Status updated (idempotent)", body = Feedback),
        (status = 400, description = "Unknown status or refused transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
pub async fn update_feedback_status(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateFeedbackStatusDto>,
) -> Result<ApiResponse<Feedback>, AppError> {
    let feedback = FeedbackService::update_status(&state.repos, id, dto).await?;
    Ok(ApiResponse::new(feedback))
}

#[utoipa::path(
    delete,
    path = "/api/feedback/{id}",
    params(
        ("id" = i64, Path, description = "Feedback ID")
    ),
    responses(
        (status = 200, description = "Feedback deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
pub async fn delete_feedback(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    FeedbackService::delete_feedback(&state.repos, id).await?;
    Ok(Deleted::ok())
}
