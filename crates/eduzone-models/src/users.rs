//! User domain models and DTOs.
//!
//! Accounts, the fixed set of roles, and the authentication request/response
//! payloads. The stored [`User`] carries the bcrypt hash and is never serialized;
//! responses use [`UserProfile`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use eduzone_core::serde::{deserialize_non_blank, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Parent,
    Librarian,
    Student,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Teacher,
        UserRole::Parent,
        UserRole::Librarian,
        UserRole::Student,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Parent => "parent",
            UserRole::Librarian => "librarian",
            UserRole::Student => "student",
        }
    }

    /// Display title, used as the default staff position.
    pub fn title(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Teacher => "Teacher",
            UserRole::Parent => "Parent",
            UserRole::Librarian => "Librarian",
            UserRole::Student => "Student",
        }
    }

    /// Roles that only an administrator may hand out.
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::Teacher | UserRole::Librarian
        )
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown role '{}'", s))
    }
}

/// Lower-cases and trims an email address. Emails are stored and compared in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            position: user.position,
            department: user.department,
            bio: user.bio,
            image: user.image_path,
            created_at: user.created_at,
        }
    }
}

/// Optional contact details kept on an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    /// Already normalized with [`normalize_email`].
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile: Profile,
}

/// Full replacement of an account's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    /// `None` keeps the current password.
    pub password_hash: Option<String>,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterDto {
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
    /// Defaults to `parent`
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    #[validate(required)]
    pub password: Option<String>,
}

/// Payload of `PUT /auth/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
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
    /// New password; omit to keep the current one
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

impl UpdateProfileDto {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("janitor".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Librarian).unwrap(), r#""librarian""#);
    }

    #[test]
    fn test_privileged_roles() {
        assert!(UserRole::Admin.is_privileged());
        assert!(UserRole::Librarian.is_privileged());
        assert!(!UserRole::Parent.is_privileged());
        assert!(!UserRole::Student.is_privileged());
    }

    #[test]
    fn test_register_validation() {
        let dto: RegisterDto = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@eduzone.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.role.is_none());

        let short: RegisterDto = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@eduzone.com","password":"123"}"#,
        )
        .unwrap();
        assert!(short.validate().is_err());

        let missing: RegisterDto = serde_json::from_str(r#"{"name":"  "}"#).unwrap();
        let errors = missing.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_user_profile_hides_password() {
        let user = User {
            id: 1,
            name: "Ada".into(),
            email: "ada@eduzone.com".into(),
            password: "$2b$04$hash".into(),
            role: UserRole::Parent,
            phone: None,
            position: None,
            department: None,
            bio: None,
            image_path: Some("/images/ada.png".into()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserProfile::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["image"], "/images/ada.png");
        assert_eq!(json["role"], "parent");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@EduZone.com "), "ada@eduzone.com");
    }
}
