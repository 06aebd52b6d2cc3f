use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use tracing::{debug, info, instrument, warn};

use eduzone_auth::create_access_token;
use eduzone_core::{AppError, hash_password_with_cost, verify_password};
use eduzone_db::StoreError;
use eduzone_models::users::normalize_email;
use eduzone_models::{
    AuthResponse, LoginDto, NewUser, Profile, RegisterDto, UpdateProfileDto, User, UserProfile,
    UserRole, UserUpdate,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::validated;

/// Hash verified against when the email is unknown, so both login failures cost
/// the same.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials")
}

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

/// Maps a unique-email violation to 400, everything else to a 500 with `context`.
pub fn map_email_conflict(err: StoreError, context: &'static str) -> AppError {
    if err.is_conflict() {
        return AppError::bad_request(anyhow!("User already exists"));
    }
    AppError::from(anyhow::Error::new(err).context(context))
}

pub struct AuthService;

impl AuthService {
    /// bcrypt on the blocking pool.
    pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
        tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
            .await
            .context("Password hashing task failed")?
    }

    pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("Password verification task failed")?
    }

    async fn burn_dummy_verification(password: String, cost: u32) {
        let _ = tokio::task::spawn_blocking(move || {
            let hash = DUMMY_HASH.get_or_init(|| {
                hash_password_with_cost("eduzone-dummy-password", cost).unwrap_or_default()
            });
            verify_password(&password, hash)
        })
        .await;
    }

    fn issue(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
        let token = create_access_token(user.id, &user.email, user.role, &state.jwt_config)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    #[instrument(skip(state, caller, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn register(
        state: &AppState,
        caller: Option<&AuthUser>,
        dto: RegisterDto,
    ) -> Result<AuthResponse, AppError> {
        let (name, email, password, role) = validated(dto, |dto| {
            Some((
                dto.name?,
                dto.email?,
                dto.password?,
                dto.role.unwrap_or(UserRole::Parent),
            ))
        })?;

        if role.is_privileged() && !caller.is_some_and(|c| c.role() == UserRole::Admin) {
            warn!(requested_role = %role, "Refused privileged self-registration");
            return Err(AppError::forbidden(format!(
                "Only administrators can create {} accounts",
                role
            )));
        }

        let email = normalize_email(&email);

        if state
            .repos
            .users
            .find_by_email(&email)
            .await
            .context("Error registering user")?
            .is_some()
        {
            debug!(email = %email, "Registration with existing email");
            return Err(AppError::bad_request(anyhow!("User already exists")));
        }

        let password_hash = Self::hash_password(password, state.auth_config.bcrypt_cost).await?;

        let user = state
            .repos
            .users
            .create(NewUser {
                name,
                email,
                password_hash,
                role,
                profile: Profile::default(),
            })
            .await
            .map_err(|e| map_email_conflict(e, "Error registering user"))?;

        info!(user.id = user.id, user.role = %user.role, "User registered");

        Self::issue(state, user)
    }

    #[instrument(skip(state, dto), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(state: &AppState, dto: LoginDto) -> Result<AuthResponse, AppError> {
        let (email, password) = validated(dto, |dto| Some((dto.email?, dto.password?)))?;
        let email = normalize_email(&email);

        let Some(user) = state
            .repos
            .users
            .find_by_email(&email)
            .await
            .context("Error logging in")?
        else {
            Self::burn_dummy_verification(password, state.auth_config.bcrypt_cost).await;
            debug!("Login attempt for unknown email");
            return Err(invalid_credentials());
        };

        let demo_login = state
            .auth_config
            .demo_login_password
            .as_deref()
            .is_some_and(|demo| demo == password);

        if demo_login {
            warn!(user.id = user.id, email = %user.email, "Login accepted with the demo password");
        } else if !Self::verify_password(password, user.password.clone()).await? {
            debug!(user.id = user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        info!(user.id = user.id, "User logged in");

        Self::issue(state, user)
    }

    #[instrument(skip(state), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn current_user(state: &AppState, user_id: i64) -> Result<UserProfile, AppError> {
        state
            .repos
            .users
            .find_by_id(user_id)
            .await
            .context("Error fetching user")?
            .map(UserProfile::from)
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(state, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_current_user(
        state: &AppState,
        user_id: i64,
        dto: UpdateProfileDto,
    ) -> Result<UserProfile, AppError> {
        let profile = dto.profile();
        let (name, email, password) =
            validated(dto, |dto| Some((dto.name?, dto.email?, dto.password)))?;

        let password_hash = match password {
            Some(password) => {
                Some(Self::hash_password(password, state.auth_config.bcrypt_cost).await?)
            }
            None => None,
        };

        let user = state
            .repos
            .users
            .update(
                user_id,
                None,
                UserUpdate {
                    name,
                    email: normalize_email(&email),
                    password_hash,
                    profile,
                },
            )
            .await
            .map_err(|e| map_email_conflict(e, "Error updating profile"))?
            .ok_or_else(user_not_found)?;

        info!(user.id = user.id, "Profile updated");
        Ok(user.into())
    }
}
