use anyhow::anyhow;
use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};

use eduzone_core::AppError;

/// A parsed `multipart/form-data` upload for `POST /forms`.
#[derive(Debug, Clone)]
pub struct FormUpload {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

fn read_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::bad_request(anyhow!(
            "File exceeds maximum size of {} bytes",
            max_bytes
        ));
    }
    AppError::bad_request(anyhow!("Invalid multipart body: {}", err.body_text()))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl FormUpload {
    /// Reads every part of the request. Unknown parts are ignored; absent or blank
    /// required parts are reported together.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut title = None;
        let mut description = None;
        let mut category = None;
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error(e, max_bytes))?
        {
            match field.name() {
                Some("title") => {
                    title = non_blank(field.text().await.map_err(|e| read_error(e, max_bytes))?)
                }
                Some("description") => {
                    description =
                        non_blank(field.text().await.map_err(|e| read_error(e, max_bytes))?)
                }
                Some("category") => {
                    category =
                        non_blank(field.text().await.map_err(|e| read_error(e, max_bytes))?)
                }
                Some("file") => {
                    let file_name = field.file_name().map(str::to_string);
                    let mime_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| read_error(e, max_bytes))?;
                    if !bytes.is_empty() {
                        file = Some((file_name, mime_type, bytes.to_vec()));
                    }
                }
                _ => {}
            }
        }

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title".to_string());
        }
        if category.is_none() {
            missing.push("category".to_string());
        }
        if file.is_none() {
            missing.push("file".to_string());
        }

        match (title, category, file) {
            (Some(title), Some(category), Some((file_name, mime_type, bytes))) => Ok(Self {
                title,
                description,
                category,
                file_name,
                mime_type,
                bytes,
            }),
            _ => Err(AppError::missing_fields(missing)),
        }
    }
}

/// File extension used for a stored document of the given content type.
pub fn document_extension(mime_type: &str) -> &'static str {
    match mime_type {
        "application/pdf" => "pdf",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        "text/plain" => "txt",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        _ => "bin",
    }
}
