//! Demo accounts and administrator creation.

use tracing::{debug, info};

use eduzone_db::Repositories;
use eduzone_models::users::normalize_email;
use eduzone_models::{NewUser, Profile, User, UserRole};

use super::catalogue::TEACHERS;
use super::{SeedError, check_password, hash};

const DEMO_ACCOUNTS: &[(&str, &str, UserRole)] = &[
    ("Admin User", "admin@eduzone.com", UserRole::Admin),
    ("Teacher User", "teacher@eduzone.com", UserRole::Teacher),
    ("Parent User", "parent@eduzone.com", UserRole::Parent),
    ("Librarian User", "librarian@eduzone.com", UserRole::Librarian),
    ("Student User", "student@eduzone.com", UserRole::Student),
];

/// Creates the demo accounts and a staff account for every directory teacher.
/// Returns how many accounts were created.
pub async fn seed_accounts(
    repos: &Repositories,
    password: &str,
    bcrypt_cost: u32,
) -> Result<usize, SeedError> {
    check_password(password)?;
    let password_hash = hash(password, bcrypt_cost)?;

    let staff = TEACHERS.iter().map(|(name, subject, email, phone)| {
        (
            *name,
            *email,
            UserRole::Teacher,
            Profile {
                phone: Some(phone.to_string()),
                position: Some(format!("{} Teacher", subject)),
                ..Profile::default()
            },
        )
    });

    let demo = DEMO_ACCOUNTS
        .iter()
        .map(|(name, email, role)| (*name, *email, *role, Profile::default()));

    let mut created = 0;
    for (name, email, role, profile) in demo.chain(staff) {
        if repos.users.find_by_email(email).await?.is_some() {
            debug!(email = %email, "Account already exists, skipping");
            continue;
        }

        repos
            .users
            .create(NewUser {
                name: name.to_string(),
                email: normalize_email(email),
                password_hash: password_hash.clone(),
                role,
                profile,
            })
            .await?;
        created += 1;
    }

    Ok(created)
}

/// Creates an administrator account. Fails if the email is taken.
pub async fn create_admin(
    repos: &Repositories,
    name: &str,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<User, SeedError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SeedError::InvalidInput("Name is required".to_string()));
    }

    let email = normalize_email(email);
    if !email.contains('@') {
        return Err(SeedError::InvalidInput("Invalid email address".to_string()));
    }

    check_password(password)?;

    if repos.users.find_by_email(&email).await?.is_some() {
        return Err(SeedError::AlreadyExists(email));
    }

    let user = repos
        .users
        .create(NewUser {
            name: name.to_string(),
            email: email.clone(),
            password_hash: hash(password, bcrypt_cost)?,
            role: UserRole::Admin,
            profile: Profile::default(),
        })
        .await
        .map_err(|e| {
            if e.is_conflict() {
                SeedError::AlreadyExists(email.clone())
            } else {
                SeedError::Store(e)
            }
        })?;

    info!(user_id = user.id, email = %user.email, "Administrator created");

    Ok(user)
}
