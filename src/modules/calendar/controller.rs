use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::{CalendarEvent, EventDto, EventFilterParams};

use crate::middleware::auth::RequireEventManager;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::service::CalendarService;

#[utoipa::path(
    get,
    path = "/api/calendar/events",
    params(EventFilterParams),
    responses(
        (status = 200, description = "Events ordered by date, optionally limited to an inclusive range", body = [CalendarEvent]),
        (status = 400, description = "Invalid date range")
    ),
    tag = "Calendar"
)]
pub async fn get_events(
    State(state): State<AppState>,
    filter: Result<Query<EventFilterParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<CalendarEvent>>, AppError> {
    let Query(filter) = filter.map_err(|e| {
        AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e.body_text()))
    })?;

    let events = CalendarService::list_events(&state.repos, filter).await?;
    Ok(ApiResponse::new(events))
}

#[utoipa::path(
    get,
    path = "/api/calendar/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = CalendarEvent),
        (status = 404, description = "Event not found")
    ),
    tag = "Calendar"
)]
pub async fn get_event(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<CalendarEvent>, AppError> {
    let event = CalendarService::get_event(&state.repos, id).await?;
    Ok(ApiResponse::new(event))
}

#[utoipa::path(
    post,
    path = "/api/calendar/events",
    request_body = EventDto,
    responses(
        (status = 201, description = "Event created", body = CalendarEvent),
        (status = 400, description = "Missing required fields or invalid date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only")
    ),
    tag = "Calendar",
    security(("bearer_auth" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> Result<(StatusCode, ApiResponse<CalendarEvent>), AppError> {
    let event = CalendarService::create_event(&state.repos, dto).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(event)))
}

#[utoipa::path(
    put,
    path = "/api/calendar/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = EventDto,
    responses(
        (status = 200, description = "Event updated", body = CalendarEvent),
        (status = 400, description = "Missing required fields or invalid date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only"),
        (status = 404, description = "Event not found")
    ),
    tag = "Calendar",
    security(("bearer_auth" = []))
)]
pub async fn update_event(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> Result<ApiResponse<CalendarEvent>, AppError> {
    let event = CalendarService::update_event(&state.repos, id, dto).await?;
    Ok(ApiResponse::new(event))
}

#[utoipa::path(
    delete,
    path = "/api/calendar/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or teacher only"),
        (status = 404, description = "Event not found")
    ),
    tag = "Calendar",
    security(("bearer_auth" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    RequireEventManager(_auth_user): RequireEventManager,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    CalendarService::delete_event(&state.repos, id).await?;
    Ok(Deleted::ok())
}
