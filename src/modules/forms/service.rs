use anyhow::{Context, anyhow};
use tracing::{debug, error, info, instrument, warn};

use eduzone_core::AppError;
use eduzone_core::file_storage::FileStorage;
use eduzone_db::Repositories;
use eduzone_models::{Form, FormDownload, NewForm, UpdateFormDto};

use crate::state::AppState;
use crate::validator::validated;

use super::model::{FormUpload, document_extension};

pub struct FormService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Form not found"))
}

impl FormService {
    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "forms"))]
    pub async fn list_forms(repos: &Repositories) -> Result<Vec<Form>, AppError> {
        Ok(repos.forms.list().await.context("Error fetching forms")?)
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "forms"))]
    pub async fn get_form(repos: &Repositories, id: i64) -> Result<Form, AppError> {
        repos
            .forms
            .find_by_id(id)
            .await
            .context("Error fetching form")?
            .ok_or_else(not_found)
    }

    /// Stores the document under a generated key, then records the form. The file is
    /// removed again if the insert fails.
    #[instrument(skip(state, upload), fields(file.size = upload.bytes.len(), file.mime = %upload.mime_type, db.operation = "INSERT", db.table = "forms"))]
    pub async fn create_form(state: &AppState, upload: FormUpload) -> Result<Form, AppError> {
        let storage = state.file_storage.as_ref();

        storage
            .check(&upload.mime_type, upload.bytes.len())
            .map_err(|e| AppError::bad_request(anyhow!("{}", e)))?;

        let key = format!(
            "forms/{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple(),
            document_extension(&upload.mime_type)
        );

        debug!(storage_key = %key, original_name = ?upload.file_name, "Saving form document");

        storage.save(&key, &upload.bytes).await.map_err(|e| {
            error!(storage_key = %key, error = %e, "Failed to save form document");
            if e.is_client_error() {
                AppError::bad_request(anyhow!("{}", e))
            } else {
                AppError::internal(anyhow::Error::new(e).context("Error uploading form"))
            }
        })?;

        let file_path = storage
            .get_url(&key)
            .map_err(|e| AppError::internal(anyhow::Error::new(e).context("Error uploading form")))?;

        let created = state
            .repos
            .forms
            .create(NewForm {
                title: upload.title,
                description: upload.description,
                category: upload.category,
                file_path,
                file_size: upload.bytes.len() as i64,
            })
            .await;

        let form = match created {
            Ok(form) => form,
            Err(e) => {
                remove_document(storage, &key).await;
                return Err(AppError::from(
                    anyhow::Error::new(e).context("Error uploading form"),
                ));
            }
        };

        info!(form.id = form.id, form.title = %form.title, "Form uploaded");
        Ok(form)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "UPDATE", db.table = "forms"))]
    pub async fn update_form(
        repos: &Repositories,
        id: i64,
        dto: UpdateFormDto,
    ) -> Result<Form, AppError> {
        let changes = validated(dto, UpdateFormDto::into_changes)?;

        let form = repos
            .forms
            .update(id, changes)
            .await
            .context("Error updating form")?
            .ok_or_else(not_found)?;

        info!(form.id = form.id, "Form updated");
        Ok(form)
    }

    /// Deletes the record, then its document. A failure to remove the file is
    /// logged only.
    #[instrument(skip(state), fields(db.operation = "DELETE", db.table = "forms"))]
    pub async fn delete_form(state: &AppState, id: i64) -> Result<(), AppError> {
        let form = state
            .repos
            .forms
            .delete(id)
            .await
            .context("Error deleting form")?
            .ok_or_else(not_found)?;

        let storage = state.file_storage.as_ref();
        match storage.key_from_url(&form.file_path) {
            Some(key) => remove_document(storage, key).await,
            None => warn!(form.id = id, file_path = %form.file_path, "Form document is not in managed storage"),
        }

        info!(form.id = id, "Form deleted");
        Ok(())
    }

    /// Counts a download and hands back where the document lives.
    #[instrument(skip(repos), fields(db.operation = "UPDATE", db.table = "forms"))]
    pub async fn download_form(repos: &Repositories, id: i64) -> Result<FormDownload, AppError> {
        let form = repos
            .forms
            .record_download(id)
            .await
            .context("Error recording download")?
            .ok_or_else(not_found)?;

        debug!(form.id = id, downloads = form.downloads, "Form download recorded");

        Ok(FormDownload {
            download_url: form.file_path.clone(),
            form,
        })
    }
}

async fn remove_document(storage: &dyn FileStorage, key: &str) {
    if let Err(e) = storage.delete(key).await {
        warn!(storage_key = %key, error = %e, "Failed to remove form document");
    }
}
