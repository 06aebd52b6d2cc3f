use axum::{extract::State, http::StatusCode};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::{Teacher, TeacherDto};

use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::service::TeacherService;

#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "Teacher directory ordered by name", body = [Teacher])
    ),
    tag = "Teachers"
)]
pub async fn get_teachers(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Teacher>>, AppError> {
    let teachers = TeacherService::list_teachers(&state.repos).await?;
    Ok(ApiResponse::new(teachers))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers"
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(&state.repos, id).await?;
    Ok(ApiResponse::new(teacher))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = TeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<TeacherDto>,
) -> Result<(StatusCode, ApiResponse<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(&state.repos, dto).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(teacher)))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    request_body = TeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<TeacherDto>,
) -> Result<ApiResponse<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(&state.repos, id, dto).await?;
    Ok(ApiResponse::new(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    TeacherService::delete_teacher(&state.repos, id).await?;
    Ok(Deleted::ok())
}
