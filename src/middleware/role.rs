//! Role checks shared by the role extractors.

use eduzone_core::AppError;
use eduzone_models::UserRole;

use crate::middleware::auth::AuthUser;

/// Human readable list of roles, e.g. "admin or librarian".
pub fn describe_roles(roles: &[UserRole]) -> String {
    let names: Vec<&str> = roles.iter().map(UserRole::as_str).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Fails with 403 unless the caller holds one of `allowed`.
pub fn check_any_role(auth_user: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if auth_user.has_any_role(allowed) {
        return Ok(());
    }

    Err(AppError::forbidden(format!(
        "Access denied. Required role: {}",
        describe_roles(allowed)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use eduzone_auth::Claims;

    fn user(role: UserRole) -> AuthUser {
        AuthUser(Claims {
            id: 1,
            email: "someone@eduzone.com".to_string(),
            role,
            iat: 0,
            exp: 0,
        })
    }

    #[test]
    fn test_describe_roles() {
        assert_eq!(describe_roles(&[UserRole::Admin]), "admin");
        assert_eq!(
            describe_roles(&[UserRole::Admin, UserRole::Librarian]),
            "admin or librarian"
        );
        assert_eq!(
            describe_roles(&[UserRole::Admin, UserRole::Teacher, UserRole::Librarian]),
            "admin, teacher or librarian"
        );
    }

    #[test]
    fn test_check_any_role() {
        let allowed = [UserRole::Admin, UserRole::Librarian];
        assert!(check_any_role(&user(UserRole::Librarian), &allowed).is_ok());

        let err = check_any_role(&user(UserRole::Parent), &allowed).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(
            err.error.to_string(),
            "Access denied. Required role: admin or librarian"
        );
    }
}
