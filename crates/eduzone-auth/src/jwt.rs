//! JWT creation and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use eduzone_config::JwtConfig;
use eduzone_core::AppError;
use eduzone_models::UserRole;

use crate::claims::Claims;

/// `(iat, exp)` claim values for a token issued at `now` living `expiry_secs`.
///
/// Out-of-range inputs are an internal error rather than a clamped claim.
fn validity_window(now: i64, expiry_secs: i64) -> Result<(usize, usize), AppError> {
    let iat = usize::try_from(now)
        .map_err(|_| AppError::internal(anyhow::anyhow!("System clock is before the epoch")))?;
    let lifetime = usize::try_from(expiry_secs)
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("Invalid token lifetime: {}s", expiry_secs))
        })?;
    let exp = iat
        .checked_add(lifetime)
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("Token expiry overflows")))?;
    Ok((iat, exp))
}

/// Creates a signed access token valid for `jwt_config.expiry_secs`.
///
/// # Errors
///
/// Returns an internal error if the lifetime is unusable or encoding fails.
pub fn create_access_token(
    user_id: i64,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let (now, exp) = validity_window(Utc::now().timestamp(), jwt_config.expiry_secs)?;

    let claims = Claims {
        id: user_id,
        email: email.to_string(),
        role,
        iat: now,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry (no leeway) and returns the claims.
///
/// # Errors
///
/// Returns 401 "Invalid token" for any malformed, expired or foreign token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("unit-test-secret-0123456789", 3600)
    }

    #[test]
    fn test_round_trip() {
        let token = create_access_token(7, "ada@eduzone.com", UserRole::Teacher, &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "ada@eduzone.com");
        assert_eq!(claims.role, UserRole::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = create_access_token(7, "ada@eduzone.com", UserRole::Admin, &config()).unwrap();
        let other = JwtConfig::new("another-secret-9876543210", 3600);
        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[test]
    fn test_expired_token_rejected_without_leeway() {
        let now = usize::try_from(Utc::now().timestamp()).unwrap();
        let claims = Claims {
            id: 1,
            email: "ada@eduzone.com".into(),
            role: UserRole::Parent,
            iat: now - 120,
            exp: now - 1,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn test_unusable_lifetime_is_an_error() {
        assert_eq!(validity_window(1_000, 60).unwrap(), (1_000, 1_060));
        assert!(validity_window(1_000, 0).is_err());
        assert!(validity_window(1_000, -5).is_err());
        assert!(validity_window(-1, 60).is_err());

        let err = create_access_token(
            7,
            "ada@eduzone.com",
            UserRole::Teacher,
            &JwtConfig::new("unit-test-secret-0123456789", -1),
        )
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_token("not.a.token", &config()).is_err());
        assert!(verify_token("", &config()).is_err());
    }
}
