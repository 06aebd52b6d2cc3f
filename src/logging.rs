use std::path::Path;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Documentation assets are fetched in bursts by the browser UIs.
fn is_docs_asset(path: &str) -> bool {
    path.starts_with("/swagger-ui") || path.starts_with("/scalar") || path.starts_with("/api-docs")
}

/// Reuses a caller supplied `x-request-id` when it is a sane header value.
fn request_id(req: &Request) -> String {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn log_completion(status: StatusCode, latency_ms: u64) {
    let code = status.as_u16();
    if status.is_server_error() {
        error!(status = code, latency_ms, "Request failed");
    } else if status.is_client_error() {
        warn!(status = code, latency_ms, "Request rejected");
    } else {
        info!(status = code, latency_ms, "Request completed");
    }
}

/// Wraps every request in a span carrying its id, method and route, and echoes the
/// id back in the `x-request-id` response header.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let id = request_id(&req);
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if is_docs_asset(&route) {
        return next.run(req).await;
    }

    let span = info_span!(
        "http_request",
        request_id = %id,
        method = %req.method(),
        route = %route,
    );

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| log_completion(response.status(), start.elapsed().as_millis() as u64));

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,eduzone_db=info,eduzone_cli=info,tower_http=warn,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    })
}

/// Installs the global subscriber.
///
/// Console output honours `RUST_LOG`. Under `log_dir` two files roll daily:
/// `eduzone.log` keeps errors only, `eduzone.json` keeps structured info-level events.
pub fn init_tracing(log_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let console = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(default_filter());

    let errors = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, "eduzone.log"))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("error"));

    let structured = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, "eduzone.json"))
        .with_current_span(true)
        .with_span_list(false)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console)
        .with(errors)
        .with(structured)
        .init();

    Ok(())
}
