use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{Form, FormChanges, NewForm};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::FormRepository;

pub struct MemoryFormRepository {
    db: MemoryDatabase,
}

impl MemoryFormRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FormRepository for MemoryFormRepository {
    async fn list(&self) -> Result<Vec<Form>, StoreError> {
        let mut forms = self.db.read().await.forms.select(|_| true);
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(forms)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Form>, StoreError> {
        Ok(self.db.read().await.forms.get(id))
    }

    async fn create(&self, form: NewForm) -> Result<Form, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.forms.insert_with(|id| Form {
            id,
            title: form.title,
            description: form.description,
            category: form.category,
            file_path: form.file_path,
            file_size: form.file_size,
            downloads: 0,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, id: i64, changes: FormChanges) -> Result<Option<Form>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.forms.update_where(
            id,
            |_| true,
            |row| {
                row.title = changes.title;
                row.description = changes.description;
                row.category = changes.category;
            },
        ))
    }

    async fn delete(&self, id: i64) -> Result<Option<Form>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.forms.remove_where(id, |_| true))
    }

    async fn record_download(&self, id: i64) -> Result<Option<Form>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables
            .forms
            .update_where(id, |_| true, |row| row.downloads += 1))
    }
}
