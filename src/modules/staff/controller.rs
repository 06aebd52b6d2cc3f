use axum::{extract::State, http::StatusCode};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::{CreateStaffDto, StaffMember, UpdateStaffDto};

use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::service::StaffService;

#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "Staff directory ordered by name, with display defaults filled in", body = [StaffMember])
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<StaffMember>>, AppError> {
    let staff = StaffService::list_staff(&state).await?;
    Ok(ApiResponse::new(staff))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(
        ("id" = i64, Path, description = "Staff member (user) ID")
    ),
    responses(
        (status = 200, description = "Staff member details", body = StaffMember),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn get_staff_member(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<StaffMember>, AppError> {
    let member = StaffService::get_staff_member(&state, id).await?;
    Ok(ApiResponse::new(member))
}

#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffDto,
    responses(
        (status = 201, description = "Staff account created", body = StaffMember),
        (status = 400, description = "Missing required fields or user already exists"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn create_staff_member(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateStaffDto>,
) -> Result<(StatusCode, ApiResponse<StaffMember>), AppError> {
    let member = StaffService::create_staff_member(&state, dto).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(member)))
}

#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    params(
        ("id" = i64, Path, description = "Staff member (user) ID")
    ),
    request_body = UpdateStaffDto,
    responses(
        (status = 200, description = "Staff member updated", body = StaffMember),
        (status = 400, description = "Missing required fields or email already in use"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn update_staff_member(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateStaffDto>,
) -> Result<ApiResponse<StaffMember>, AppError> {
    let member = StaffService::update_staff_member(&state, id, dto).await?;
    Ok(ApiResponse::new(member))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    params(
        ("id" = i64, Path, description = "Staff member (user) ID")
    ),
    responses(
        (status = 200, description = "Staff account deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff",
    security(("bearer_auth" = []))
)]
pub async fn delete_staff_member(
    State(state): State<AppState>,
    RequireAdmin(_auth_user): RequireAdmin,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    StaffService::delete_staff_member(&state, id).await?;
    Ok(Deleted::ok())
}
