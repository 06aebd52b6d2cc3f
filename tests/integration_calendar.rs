mod common;

use axum::http::StatusCode;
use common::{error_message, setup_test_app};
use eduzone::eduzone_models::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_teacher_manages_events() {
    let app = setup_test_app();
    let teacher = app.token_with_role(UserRole::Teacher).await;

    let (status, body) = app
        .post(
            "/api/calendar/events",
            Some(&teacher),
            json!({ "title": "Science Fair", "date": "2024-03-15", "category": "Academic" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "Academic");
    assert_eq!(body["data"]["date"], "2024-03-15");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .put(
            &format!("/api/calendar/events/{}", id),
            Some(&teacher),
            json!({
                "title": "Science Fair",
                "description": "Gym hall",
                "date": "2024-03-16",
                "type": "Academic"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2024-03-16");
    assert_eq!(body["data"]["description"], "Gym hall");

    let (status, _) = app
        .delete(&format!("/api/calendar/events/{}", id), Some(&teacher))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/calendar/events/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Event not found");
}

#[tokio::test]
async fn test_event_requires_title_date_and_type() {
    let app = setup_test_app();
    let admin = app.token_with_role(UserRole::Admin).await;

    let (status, body) = app
        .post("/api/calendar/events", Some(&admin), json!({ "description": "?" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Missing required fields: date, title, type");

    let (status, body) = app
        .post(
            "/api/calendar/events",
            Some(&admin),
            json!({ "title": "Bad", "date": "15/03/2024", "type": "Academic" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid date, expected YYYY-MM-DD");
}

#[tokio::test]
async fn test_parents_cannot_create_events() {
    let app = setup_test_app();
    let parent = app.token_with_role(UserRole::Parent).await;

    let (status, body) = app
        .post(
            "/api/calendar/events",
            Some(&parent),
            json!({ "title": "Party", "date": "2024-05-01", "type": "Social" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(&body),
        "Access denied. Required role: admin or teacher"
    );
}

#[tokio::test]
async fn test_filter_by_date_range() {
    let app = setup_test_app();
    let admin = app.token_with_role(UserRole::Admin).await;

    for (title, date) in [
        ("Sports Day", "2024-06-10"),
        ("Parent Evening", "2024-02-20"),
        ("Exams Start", "2024-05-01"),
    ] {
        app.post(
            "/api/calendar/events",
            Some(&admin),
            json!({ "title": title, "date": date, "type": "School" }),
        )
        .await;
    }

    let (status, body) = app.get("/api/calendar/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-02-20", "2024-05-01", "2024-06-10"]);

    let (status, body) = app
        .get("/api/calendar/events?from=2024-03-01&to=2024-06-10", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Exams Start", "Sports Day"]);

    let (status, body) = app
        .get("/api/calendar/events?from=2024-07-01&to=2024-01-01", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "'from' must not be after 'to'");
}
