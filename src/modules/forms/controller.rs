use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::forms::UploadFormRequest;
use eduzone_models::{Form, FormDownload, UpdateFormDto};

use crate::middleware::auth::RequireEventManager;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::model::FormUpload;
use super::service::FormService;

#[utoipa::path(
    get,
    path = "/api/forms",
    responses(
        (status = 200, description = "All forms, newest first", body = [Form]),
        (status = 500, description = "Error fetching forms")
    ),
    tag = "Forms"
)]
pub async fn get_forms(State(state): State<AppState>) -> Result<ApiResponse<Vec<Form>>, AppError> {
    let forms = FormService::list_forms(&state.repos).await?;
    Ok(ApiResponse::new(forms))
}

#[utoipa::path(
    get,
    path = "/api/forms/{id}",
    params(
        ("id" = i64, Path, description = "Form ID")
    ),
    responses(
        (status = 200, description = "Form details", body = Form),
        (status = 404, description = "Form not found")
    ),
    tag = "Forms"
)]
pub async fn get_form(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<Form>, AppError> {
    let form = FormService::get_form(&state.repos, id).await?;
    Ok(ApiResponse::new(form))
}

#[utoipa::path(
    post,
    path = "/api/forms",
    request_body(content = UploadFormRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Form uploaded", body = Form),
        (status = 400, description = "Missing fields, unsupported file type or file too large"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only"),
        (status = 500, description = "Error uploading form")
    ),
    tag = "Forms",
    security(("bearer_auth" = []))
)]
pub async fn upload_form(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    multipart: Multipart,
) -> Result<(StatusCode, ApiResponse<Form>), AppError> {
    let upload =
        FormUpload::from_multipart(multipart, state.file_storage.max_file_size()).await?;
    let form = FormService::create_form(&state, upload).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(form)))
}

#[utoipa::path(
    put,
    path = "/api/forms/{id}",
    params(
        ("id" = i64, Path, description = "Form ID")
    ),
    request_body = UpdateFormDto,
    responses(
        (status = 200, description = "Form metadata updated", body = Form),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only"),
        (status = 404, description = "Form not found")
    ),
    tag = "Forms",
    security(("bearer_auth" = []))
)]
pub async fn update_form(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateFormDto>,
) -> Result<ApiResponse<Form>, AppError> {
    let form = FormService::update_form(&state.repos, id, dto).await?;
    Ok(ApiResponse::new(form))
}

#[utoipa::path(
    delete,
    path = "/api/forms/{id}",
    params(
        ("id" = i64, Path, description = "Form ID")
    ),
    responses(
        (status = 200, description = "Form and its document deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only"),
        (status = 404, description = "Form not found")
    ),
    tag = "Forms",
    security(("bearer_auth" = []))
)]
pub async fn delete_form(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    FormService::delete_form(&state, id).await?;
    Ok(Deleted::ok())
}

#[utoipa::path(
    get,
    path = "/api/forms/{id}/download",
    params(
        ("id" = i64, Path, description = "Form ID")
    ),
    responses(
        (status = 200, description = "Download counted, returns the document URL", body = FormDownload),
        (status = 404, description = "Form not found")
    ),
    tag = "Forms"
)]
pub async fn download_form(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<FormDownload>, AppError> {
    let download = FormService::download_form(&state.repos, id).await?;
    Ok(ApiResponse::new(download))
}
