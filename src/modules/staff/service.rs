use anyhow::{Context, anyhow};
use tracing::{info, instrument};

use eduzone_core::AppError;
use eduzone_models::users::normalize_email;
use eduzone_models::{CreateStaffDto, NewUser, StaffMember, UpdateStaffDto, UserRole, UserUpdate};

use crate::modules::auth::service::{AuthService, map_email_conflict};
use crate::state::AppState;
use crate::validator::validated;

/// Staff are the accounts holding this role.
const STAFF_ROLE: UserRole = UserRole::Teacher;

pub struct StaffService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Staff member not found"))
}

impl StaffService {
    #[instrument(skip(state), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_staff(state: &AppState) -> Result<Vec<StaffMember>, AppError> {
        let users = state
            .repos
            .users
            .list_by_role(STAFF_ROLE)
            .await
            .context("Error fetching staff")?;

        Ok(users.into_iter().map(StaffMember::from).collect())
    }

    #[instrument(skip(state), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_staff_member(state: &AppState, id: i64) -> Result<StaffMember, AppError> {
        state
            .repos
            .users
            .find_by_id(id)
            .await
            .context("Error fetching staff member")?
            .filter(|user| user.role == STAFF_ROLE)
            .map(StaffMember::from)
            .ok_or_else(not_found)
    }

    #[instrument(skip(state, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn create_staff_member(
        state: &AppState,
        dto: CreateStaffDto,
    ) -> Result<StaffMember, AppError> {
        let profile = dto.profile();
        let (name, email, password) =
            validated(dto, |dto| Some((dto.name?, dto.email?, dto.password?)))?;

        let password_hash = AuthService::hash_password(password, state.auth_config.bcrypt_cost).await?;

        let user = state
            .repos
            .users
            .create(NewUser {
                name,
                email: normalize_email(&email),
                password_hash,
                role: STAFF_ROLE,
                profile,
            })
            .await
            .map_err(|e| map_email_conflict(e, "Error creating staff member"))?;

        info!(user.id = user.id, "Staff member created");
        Ok(user.into())
    }

    #[instrument(skip(state, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_staff_member(
        state: &AppState,
        id: i64,
        dto: UpdateStaffDto,
    ) -> Result<StaffMember, AppError> {
        let profile = dto.profile();
        let (name, email, password) =
            validated(dto, |dto| Some((dto.name?, dto.email?, dto.password)))?;

        let password_hash = match password {
            Some(password) => {
                Some(AuthService::hash_password(password, state.auth_config.bcrypt_cost).await?)
            }
            None => None,
        };

        let user = state
            .repos
            .users
            .update(
                id,
                Some(STAFF_ROLE),
                UserUpdate {
                    name,
                    email: normalize_email(&email),
                    password_hash,
                    profile,
                },
            )
            .await
            .map_err(|e| map_email_conflict(e, "Error updating staff member"))?
            .ok_or_else(not_found)?;

        info!(user.id = user.id, "Staff member updated");
        Ok(user.into())
    }

    #[instrument(skip(state), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_staff_member(state: &AppState, id: i64) -> Result<(), AppError> {
        if !state
            .repos
            .users
            .delete(id, Some(STAFF_ROLE))
            .await
            .context("Error deleting staff member")?
        {
            return Err(not_found());
        }

        info!(user.id = id, "Staff member deleted");
        Ok(())
    }
}
