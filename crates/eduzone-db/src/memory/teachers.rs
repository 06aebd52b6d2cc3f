use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{NewTeacher, Teacher};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::TeacherRepository;

pub struct MemoryTeacherRepository {
    db: MemoryDatabase,
}

impl MemoryTeacherRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeacherRepository for MemoryTeacherRepository {
    async fn list(&self) -> Result<Vec<Teacher>, StoreError> {
        let mut teachers = self.db.read().await.teachers.select(|_| true);
        teachers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(teachers)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, StoreError> {
        Ok(self.db.read().await.teachers.get(id))
    }

    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.teachers.insert_with(|id| Teacher {
            id,
            name: teacher.name,
            subject: teacher.subject,
            email: teacher.email,
            phone: teacher.phone,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, id: i64, teacher: NewTeacher) -> Result<Option<Teacher>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.teachers.update_where(
            id,
            |_| true,
            |row| {
                row.name = teacher.name;
                row.subject = teacher.subject;
                row.email = teacher.email;
                row.phone = teacher.phone;
            },
        ))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.teachers.remove_where(id, |_| true).is_some())
    }
}
