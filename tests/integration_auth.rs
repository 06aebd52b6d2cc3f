mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use common::{TEST_PASSWORD, error_message, generate_unique_email, setup_test_app, setup_test_app_with};
use eduzone::eduzone_auth::Claims;
use eduzone::eduzone_models::UserRole;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

#[tokio::test]
async fn test_register_then_me() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "New Parent", "email": email, "password": "secret123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let user = body["data"]["user"].clone();
    assert_eq!(user["role"], "parent");
    assert!(user.get("password").is_none());

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user["id"]);
    assert_eq!(body["data"]["email"], user["email"]);
    assert_eq!(body["data"]["role"], user["role"]);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let payload = json!({ "name": "Someone", "email": email, "password": "secret123" });

    let (status, _) = app.post("/api/auth/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // Email comparison ignores case
    let mut shouted = payload.clone();
    shouted["email"] = json!(email.to_uppercase());
    let (status, body) = app.post("/api/auth/register", None, shouted).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "User already exists");
}

#[tokio::test]
async fn test_register_privileged_role_needs_admin() {
    let app = setup_test_app();
    let payload = json!({
        "name": "Teacher",
        "email": generate_unique_email(),
        "password": "secret123",
        "role": "teacher"
    });

    let (status, body) = app.post("/api/auth/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(&body),
        "Only administrators can create teacher accounts"
    );

    let admin = app.token_with_role(UserRole::Admin).await;
    let (status, body) = app.post("/api/auth/register", Some(&admin), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "teacher");
}

#[tokio::test]
async fn test_register_validation() {
    let app = setup_test_app();

    let (status, body) = app
        .post("/api/auth/register", None, json!({ "name": "No Email" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"], json!(["email", "password"]));

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Short", "email": generate_unique_email(), "password": "123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Password must be at least 6 characters");
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = setup_test_app();
    let user = app.create_user(UserRole::Parent).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["id"], user.id);

    let (wrong_status, wrong_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": "not-the-password" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@eduzone.com", "password": "not-the-password" }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&wrong_body), "Invalid credentials");
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_demo_password_logs_into_existing_accounts_only() {
    let app = setup_test_app_with(&[("DEMO_LOGIN_PASSWORD", "demo-pass")]);
    let user = app.create_user(UserRole::Librarian).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": "demo-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "librarian");

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ghost@eduzone.com", "password": "demo-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_bad_tokens() {
    let app = setup_test_app();
    let user = app.create_user(UserRole::Parent).await;

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "No token provided");

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid authorization header format");

    let now = Utc::now().timestamp() as usize;
    let foreign = encode(
        &Header::default(),
        &Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + 3600,
        },
        &EncodingKey::from_secret(b"some-other-secret-entirely"),
    )
    .unwrap();
    let (status, body) = app.get("/api/auth/me", Some(&foreign)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid token");

    let expired = encode(
        &Header::default(),
        &Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now - 7200,
            exp: now - 10,
        },
        &EncodingKey::from_secret(common::TEST_SECRET.as_bytes()),
    )
    .unwrap();
    let (status, _) = app.get("/api/auth/me", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_deleted_account() {
    let app = setup_test_app();
    let user = app.create_user(UserRole::Teacher).await;
    let token = app.token_for(&user);
    app.state.repos.users.delete(user.id, None).await.unwrap();

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "User not found");

    // A taken email does not mask the missing account
    let taken = app.create_user(UserRole::Parent).await;
    let (status, body) = app
        .put(
            "/api/auth/me",
            Some(&token),
            json!({ "name": "Gone", "email": taken.email }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "User not found");
}

#[tokio::test]
async fn test_update_me() {
    let app = setup_test_app();
    let user = app.create_user(UserRole::Teacher).await;
    let token = app.token_for(&user);
    let taken = app.create_user(UserRole::Parent).await;

    let (status, body) = app
        .put(
            "/api/auth/me",
            Some(&token),
            json!({
                "name": "Renamed Teacher",
                "email": user.email,
                "phone": "555-0100",
                "department": "Science",
                "password": "new-secret"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed Teacher");
    assert_eq!(body["data"]["phone"], "555-0100");

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": user.email, "password": "new-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put(
            "/api/auth/me",
            Some(&token),
            json!({ "name": "Renamed Teacher", "email": taken.email }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "User already exists");
}
