use std::any::Any;

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware};
use serde_json::{Map, Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tracing::error;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use eduzone_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::books::router::init_books_router;
use crate::modules::calendar::router::init_calendar_router;
use crate::modules::feedback::router::init_feedback_router;
use crate::modules::forms::router::init_forms_router;
use crate::modules::staff::router::init_staff_router;
use crate::modules::system::controller::route_not_found;
use crate::modules::system::router::init_system_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::{AppState, UPLOADS_PREFIX};

pub fn init_router(state: AppState) -> Router {
    let api = init_system_router()
        .nest("/auth", init_auth_router())
        .nest("/books", init_books_router())
        .nest("/teachers", init_teachers_router())
        .nest("/staff", init_staff_router())
        .nest("/calendar", init_calendar_router())
        .nest(
            "/forms",
            init_forms_router(state.server_config.upload_max_bytes),
        )
        .nest("/feedback", init_feedback_router());

    let include_panic_details = state.server_config.environment.is_development();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .nest_service(
            UPLOADS_PREFIX,
            ServeDir::new(state.server_config.upload_dir.clone()),
        )
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.server_config.request_timeout,
        ))
        .layer(cors_layer(&state.cors_config))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| {
                panic_response(panic, include_panic_details)
            },
        ))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin
    if config.allows_any() {
        return layer.allow_origin(AnyOrigin);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, include_details: bool) -> Response {
    let details = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    error!(panic = %details, "Handler panicked");

    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        Value::String("Internal server error".to_string()),
    );
    if include_details {
        body.insert("details".to_string(), Value::String(details));
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": body })),
    )
        .into_response()
}
