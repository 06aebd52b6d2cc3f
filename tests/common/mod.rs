#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use eduzone::eduzone_auth::create_access_token;
use eduzone::eduzone_config::AppConfig;
use eduzone::eduzone_core::hash_password_with_cost;
use eduzone::eduzone_db::Repositories;
use eduzone::eduzone_models::{NewUser, Profile, User, UserRole};
use eduzone::router::init_router;
use eduzone::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-value";
pub const TEST_PASSWORD: &str = "Password123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
}

pub fn test_config(upload_dir: &PathBuf, extra: &[(&str, &str)]) -> AppConfig {
    let upload_dir = upload_dir.to_string_lossy().to_string();
    let mut vars: Vec<(String, String)> = vec![
        ("JWT_SECRET".into(), TEST_SECRET.into()),
        ("STORAGE_BACKEND".into(), "memory".into()),
        ("SEED_DEMO_DATA".into(), "false".into()),
        ("BCRYPT_COST".into(), "4".into()),
        ("APP_ENV".into(), "test".into()),
        ("UPLOAD_DIR".into(), upload_dir),
    ];
    for (key, value) in extra {
        vars.retain(|(k, _)| k != key);
        vars.push((key.to_string(), value.to_string()));
    }

    AppConfig::from_vars(move |key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

pub fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let upload_dir = std::env::temp_dir().join(format!("eduzone-uploads-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&upload_dir).unwrap();

    let config = test_config(&upload_dir, extra);
    let state = AppState::new(&config, Repositories::in_memory());

    TestApp {
        router: init_router(state.clone()),
        state,
        upload_dir,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@eduzone.com", Uuid::new_v4().simple())
}

impl TestApp {
    pub async fn create_user(&self, role: UserRole) -> User {
        self.create_named_user("Test User", &generate_unique_email(), role)
            .await
    }

    pub async fn create_named_user(&self, name: &str, email: &str, role: UserRole) -> User {
        let password_hash = hash_password_with_cost(TEST_PASSWORD, 4).unwrap();
        self.state
            .repos
            .users
            .create(NewUser {
                name: name.to_string(),
                email: email.to_lowercase(),
                password_hash,
                role,
                profile: Profile::default(),
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        create_access_token(user.id, &user.email, user.role, &self.state.jwt_config).unwrap()
    }

    /// Creates a user with `role` and returns a token for it.
    pub async fn token_with_role(&self, role: UserRole) -> String {
        let user = self.create_user(role).await;
        self.token_for(&user)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("PUT", uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("DELETE", uri, token, None)).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
