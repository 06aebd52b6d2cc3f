use axum::extract::State;
use tracing::instrument;

use eduzone_core::{ApiResponse, AppError};
use eduzone_models::{AuthResponse, LoginDto, RegisterDto, UpdateProfileDto, UserProfile};

use crate::docs::ErrorResponse;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new account
///
/// Anonymous callers may register as `parent` (the default) or `student`. Creating
/// `admin`, `teacher` or `librarian` accounts requires an admin bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterDto,
    responses(
        (status = 200, description = "Account created, token issued", body = AuthResponse),
        (status = 400, description = "Validation error or user already exists", body = ErrorResponse),
        (status = 401, description = "Invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Privileged role requested without an admin token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterDto>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = AuthService::register(&state, caller.as_ref(), dto).await?;
    Ok(ApiResponse::new(response))
}

/// Login and receive a JWT
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok(ApiResponse::new(response))
}

/// The authenticated account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(user.id = auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<UserProfile>, AppError> {
    let user = AuthService::current_user(&state, auth_user.user_id()).await?;
    Ok(ApiResponse::new(user))
}

/// Update the authenticated account's details
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 400, description = "Validation error or email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(user.id = auth_user.user_id()))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<ApiResponse<UserProfile>, AppError> {
    let user = AuthService::update_current_user(&state, auth_user.user_id(), dto).await?;
    Ok(ApiResponse::new(user))
}
