mod common;

use axum::http::StatusCode;
use common::{error_message, setup_test_app};
use eduzone::eduzone_models::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_submit_and_review_feedback() {
    let app = setup_test_app();
    let parent = app
        .create_named_user("Sarah Johnson", "sarah@eduzone.com", UserRole::Parent)
        .await;
    let parent_token = app.token_for(&parent);
    let admin = app.token_with_role(UserRole::Admin).await;

    let (status, body) = app
        .post(
            "/api/feedback",
            Some(&parent_token),
            json!({ "type": "Suggestion", "text": "More library hours please" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["type"], "Suggestion");
    assert_eq!(body["data"]["user_id"], parent.id);
    assert_eq!(body["data"]["user_name"], "Sarah Johnson");
    let id = body["data"]["id"].as_i64().unwrap();

    for _ in 0..2 {
        let (status, body) = app
            .put(
                &format!("/api/feedback/{}/status", id),
                Some(&admin),
                json!({ "status": "Reviewed" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Reviewed");
    }

    let (status, body) = app
        .put(
            &format!("/api/feedback/{}/status", id),
            Some(&admin),
            json!({ "status": "Pending" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "Cannot change status from Reviewed to Pending"
    );

    let (_, body) = app.get(&format!("/api/feedback/{}", id), Some(&admin)).await;
    assert_eq!(body["data"]["status"], "Reviewed");
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = setup_test_app();
    let admin_user = app.create_user(UserRole::Admin).await;
    let admin = app.token_for(&admin_user);

    let (_, body) = app
        .post(
            "/api/feedback",
            Some(&admin),
            json!({ "type": "Complaint", "text": "Cold classrooms" }),
        )
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .put(
            &format!("/api/feedback/{}/status", id),
            Some(&admin),
            json!({ "status": "Archived" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put("/api/feedback/999/status", Some(&admin), json!({ "status": "Reviewed" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Feedback not found");
}

#[tokio::test]
async fn test_feedback_requires_type_and_text() {
    let app = setup_test_app();
    let parent = app.token_with_role(UserRole::Parent).await;

    let (status, body) = app
        .post("/api/feedback", Some(&parent), json!({ "text": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"], json!(["text", "type"]));
}

#[tokio::test]
async fn test_feedback_display_name_from_body() {
    let app = setup_test_app();
    let parent = app
        .create_named_user("Sarah Johnson", "sarah@eduzone.com", UserRole::Parent)
        .await;
    let token = app.token_for(&parent);

    let (status, body) = app
        .post(
            "/api/feedback",
            Some(&token),
            json!({ "type": "Complaint", "text": "Bus was late", "user_name": "A concerned parent" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_name"], "A concerned parent");
    assert_eq!(body["data"]["user_id"], parent.id);

    let (status, body) = app
        .post(
            "/api/feedback",
            Some(&token),
            json!({ "type": "Praise", "text": "Lovely concert", "user_name": "   " }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_name"], "Sarah Johnson");
}

#[tokio::test]
async fn test_feedback_type_longer_than_column_is_rejected() {
    let app = setup_test_app();
    let parent = app.token_with_role(UserRole::Parent).await;

    let (status, body) = app
        .post(
            "/api/feedback",
            Some(&parent),
            json!({ "type": "x".repeat(51), "text": "Hello" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Type must be at most 50 characters");
}

#[tokio::test]
async fn test_feedback_access_control() {
    let app = setup_test_app();
    let teacher = app.token_with_role(UserRole::Teacher).await;

    let (status, _) = app
        .post("/api/feedback", None, json!({ "type": "Praise", "text": "Great" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/feedback", Some(&teacher)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Access denied. Required role: admin");
}

#[tokio::test]
async fn test_delete_feedback_twice() {
    let app = setup_test_app();
    let admin = app.token_with_role(UserRole::Admin).await;

    let (_, body) = app
        .post("/api/feedback", Some(&admin), json!({ "type": "Praise", "text": "Great" }))
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/api/feedback/{}", id), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&format!("/api/feedback/{}", id), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
