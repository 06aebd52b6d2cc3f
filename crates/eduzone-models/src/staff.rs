//! Staff directory.
//!
//! Staff members are the accounts with the `teacher` role. Missing profile fields
//! are filled with display defaults when the record leaves the API.

use chrono::{DateTime, Utc};
use eduzone_core::serde::{deserialize_non_blank, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{Profile, User, UserRole};

pub const DEFAULT_DEPARTMENT: &str = "Teaching";
pub const DEFAULT_PHONE: &str = "N/A";
pub const DEFAULT_IMAGE: &str = "/images/school-logo.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub position: String,
    pub department: String,
    pub phone: String,
    pub image: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for StaffMember {
    fn from(user: User) -> Self {
        let bio = user
            .bio
            .unwrap_or_else(|| format!("{} is a dedicated member of our staff.", user.name));

        Self {
            id: user.id,
            position: user.position.unwrap_or_else(|| user.role.title().to_string()),
            department: user
                .department
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
            phone: user.phone.unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            image: user.image_path.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            bio,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required,
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    #[validate(required, length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "Position must be at most 100 characters"))]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 500, message = "Image path must be at most 500 characters"))]
    pub image: Option<String>,
}

impl CreateStaffDto {
    pub fn profile(&self) -> Profile {
        Profile {
            phone: self.phone.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            bio: self.bio.clone(),
            image_path: self.image.clone(),
        }
    }
}

/// `PUT /staff/{id}` payload. The password is optional here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required,
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "Position must be at most 100 characters"))]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 500, message = "Image path must be at most 500 characters"))]
    pub image: Option<String>,
}

impl UpdateStaffDto {
    pub fn profile(&self) -> Profile {
        Profile {
            phone: self.phone.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            bio: self.bio.clone(),
            image_path: self.image.clone(),
        }
    }
}
