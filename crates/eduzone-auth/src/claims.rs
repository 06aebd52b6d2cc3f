use eduzone_models::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_wire_format() {
        let claims = Claims {
            id: 42,
            email: "admin@eduzone.com".to_string(),
            role: UserRole::Admin,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 42,
                "email": "admin@eduzone.com",
                "role": "admin",
                "iat": 1_700_000_000u64,
                "exp": 1_700_086_400u64
            })
        );
    }

    #[test]
    fn test_has_role() {
        let claims: Claims = serde_json::from_str(
            r#"{"id":3,"email":"lib@eduzone.com","role":"librarian","iat":1,"exp":2}"#,
        )
        .unwrap();
        assert!(claims.has_role(&[UserRole::Admin, UserRole::Librarian]));
        assert!(!claims.has_role(&[UserRole::Admin]));
    }
}
