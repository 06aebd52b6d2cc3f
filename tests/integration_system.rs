mod common;

use axum::http::StatusCode;
use common::setup_test_app;

#[tokio::test]
async fn test_api_index_lists_endpoints() {
    let app = setup_test_app();

    let (status, body) = app.get("/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "EduZone API");
    let paths: Vec<&str> = body["data"]["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|group| group["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/api/books"));
    assert!(paths.contains(&"/api/feedback"));
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = setup_test_app();

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["backend"], "memory");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = setup_test_app();

    let (status, body) = app.get("/api/nothing-here?x=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Route not found");
    assert_eq!(body["error"]["path"], "/api/nothing-here?x=1");
}
