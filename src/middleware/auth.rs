use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use eduzone_auth::{Claims, verify_token};
use eduzone_core::AppError;
use eduzone_models::UserRole;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.0.has_role(roles)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<Result<&str, AppError>> {
    let value = headers.get(header::AUTHORIZATION)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"));

    Some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("No token provided"))??;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Like [`AuthUser`] but anonymous callers are allowed through as `None`.
///
/// A present but invalid token is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            None => Ok(MaybeAuthUser(None)),
            Some(token) => {
                let claims = verify_token(token?, &state.jwt_config)?;
                Ok(MaybeAuthUser(Some(AuthUser(claims))))
            }
        }
    }
}

/// Generates an extractor that requires one of the given roles.
#[macro_export]
macro_rules! require_role {
    ($name:ident, [$($role:ident),+ $(,)?]) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = eduzone_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                $crate::middleware::role::check_any_role(
                    &auth_user,
                    &[$(eduzone_models::UserRole::$role),+],
                )?;

                Ok($name(auth_user))
            }
        }
    };
}

// Pre-defined role extractors

require_role!(RequireAdmin, [Admin]);
require_role!(RequireLibraryStaff, [Admin, Librarian]);
require_role!(RequireEventManager, [Admin, Teacher]);
