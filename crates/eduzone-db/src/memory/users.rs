use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{NewUser, User, UserRole, UserUpdate};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::UserRepository;

const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct MemoryUserRepository {
    db: MemoryDatabase,
}

impl MemoryUserRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

fn conflict() -> StoreError {
    StoreError::Conflict {
        constraint: Some(EMAIL_CONSTRAINT.to_string()),
    }
}

fn role_matches(user: &User, only_role: Option<UserRole>) -> bool {
    only_role.is_none_or(|role| user.role == role)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError> {
        let tables = self.db.read().await;
        let mut users = tables.users.select(|u| u.role == role);
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.db.read().await.users.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.db.read().await;
        Ok(tables.users.select(|u| u.email == email).into_iter().next())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.db.write().await;
        if tables.users.any(|u| u.email == user.email) {
            return Err(conflict());
        }

        Ok(tables.users.insert_with(|id| User {
            id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            phone: user.profile.phone,
            position: user.profile.position,
            department: user.profile.department,
            bio: user.profile.bio,
            image_path: user.profile.image_path,
            created_at: Utc::now(),
        }))
    }

    async fn update(
        &self,
        id: i64,
        only_role: Option<UserRole>,
        changes: UserUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.db.write().await;
        // Missing or out-of-role rows are not found, whatever the email
        if !tables
            .users
            .get(id)
            .is_some_and(|u| role_matches(&u, only_role))
        {
            return Ok(None);
        }
        if tables
            .users
            .any(|u| u.id != id && u.email == changes.email)
        {
            return Err(conflict());
        }

        Ok(tables.users.update_where(
            id,
            |u| role_matches(u, only_role),
            |u| {
                u.name = changes.name;
                u.email = changes.email;
                if let Some(hash) = changes.password_hash {
                    u.password = hash;
                }
                u.phone = changes.profile.phone;
                u.position = changes.profile.position;
                u.department = changes.profile.department;
                u.bio = changes.profile.bio;
                u.image_path = changes.profile.image_path;
            },
        ))
    }

    async fn delete(&self, id: i64, only_role: Option<UserRole>) -> Result<bool, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables
            .users
            .remove_where(id, |u| role_matches(u, only_role))
            .is_some())
    }
}
