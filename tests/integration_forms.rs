mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{TestApp, error_message, setup_test_app, setup_test_app_with};
use eduzone::eduzone_models::UserRole;
use serde_json::{Value, json};

const BOUNDARY: &str = "eduzone-test-boundary";

struct FilePart<'a> {
    name: &'a str,
    mime_type: &'a str,
    bytes: &'a [u8],
}

fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.name, file.mime_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(app: &TestApp, token: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/forms")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    app.send(request).await
}

fn pdf(bytes: &[u8]) -> Option<FilePart<'_>> {
    Some(FilePart {
        name: "permission.pdf",
        mime_type: "application/pdf",
        bytes,
    })
}

#[tokio::test]
async fn test_upload_download_and_delete_form() {
    let app = setup_test_app();
    let teacher = app.token_with_role(UserRole::Teacher).await;
    let content = b"%PDF-1.4 permission slip";

    let (status, body) = upload(
        &app,
        &teacher,
        multipart_body(
            &[("title", "Field Trip Permission"), ("category", "Permissions")],
            pdf(content),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let form = body["data"].clone();
    assert_eq!(form["title"], "Field Trip Permission");
    assert_eq!(form["downloads"], 0);
    assert_eq!(form["file_size"], content.len() as i64);
    let id = form["id"].as_i64().unwrap();
    let file_path = form["file_path"].as_str().unwrap().to_string();
    assert!(file_path.starts_with("/uploads/forms/"));
    assert!(file_path.ends_with(".pdf"));

    let stored = app
        .upload_dir
        .join(file_path.trim_start_matches("/uploads/"));
    assert_eq!(std::fs::read(&stored).unwrap(), content);

    // Served as a static file
    let (status, _) = app.get(&file_path, None).await;
    assert_eq!(status, StatusCode::OK);

    for expected in 1..=2 {
        let (status, body) = app.get(&format!("/api/forms/{}/download", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["download_url"], file_path.as_str());
        assert_eq!(body["data"]["form"]["downloads"], expected);
    }

    let (status, body) = app
        .put(
            &format!("/api/forms/{}", id),
            Some(&teacher),
            json!({ "title": "Trip Permission", "category": "Permissions" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Trip Permission");
    assert_eq!(body["data"]["downloads"], 2);

    let (status, _) = app.delete(&format!("/api/forms/{}", id), Some(&teacher)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!stored.exists());

    let (status, body) = app.get(&format!("/api/forms/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Form not found");
}

#[tokio::test]
async fn test_upload_requires_fields_and_file() {
    let app = setup_test_app();
    let admin = app.token_with_role(UserRole::Admin).await;

    let (status, body) = upload(&app, &admin, multipart_body(&[("title", "Menu")], None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"], json!(["category", "file"]));
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let app = setup_test_app();
    let admin = app.token_with_role(UserRole::Admin).await;

    let (status, body) = upload(
        &app,
        &admin,
        multipart_body(
            &[("title", "Archive"), ("category", "Misc")],
            Some(FilePart {
                name: "archive.zip",
                mime_type: "application/zip",
                bytes: b"PK",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).starts_with("File type 'application/zip' not allowed"));
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app_with(&[("UPLOAD_MAX_BYTES", "16")]);
    let admin = app.token_with_role(UserRole::Admin).await;

    let (status, body) = upload(
        &app,
        &admin,
        multipart_body(
            &[("title", "Big"), ("category", "Misc")],
            pdf(&[b'x'; 32]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "File exceeds maximum size of 16 bytes");

    let forms_dir = app.upload_dir.join("forms");
    let leftovers = std::fs::read_dir(&forms_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_parents_cannot_upload() {
    let app = setup_test_app();
    let parent = app.token_with_role(UserRole::Parent).await;

    let (status, _) = upload(
        &app,
        &parent,
        multipart_body(&[("title", "A"), ("category", "B")], pdf(b"%PDF")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
