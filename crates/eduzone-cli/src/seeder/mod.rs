//! Demo data seeding.
//!
//! Seeding is idempotent: catalogue tables are only filled when empty and accounts
//! are skipped when their email is already registered.

mod accounts;
mod catalogue;

use std::time::Instant;

use thiserror::Error;
use tracing::info;

use eduzone_db::{Repositories, StoreError};
use eduzone_models::User;

pub use accounts::{create_admin, seed_accounts};
pub use catalogue::{seed_books, seed_events, seed_feedback, seed_teachers};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("a user with email '{0}' already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Password given to every demo account. Accounts are skipped without one.
    pub password: Option<String>,
    pub bcrypt_cost: u32,
}

impl SeedConfig {
    pub fn new(password: Option<String>) -> Self {
        Self {
            password,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

/// Rows inserted by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub books: usize,
    pub teachers: usize,
    pub events: usize,
    pub feedback: usize,
    pub accounts: usize,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.books + self.teachers + self.events + self.feedback + self.accounts
    }
}

/// Seeds the library catalogue, teacher directory, calendar, feedback inbox and, when
/// a password is configured, the demo accounts.
pub async fn seed_demo_data(
    repos: &Repositories,
    config: &SeedConfig,
) -> Result<SeedSummary, SeedError> {
    let start_time = Instant::now();

    let mut summary = SeedSummary {
        books: seed_books(repos).await?,
        teachers: seed_teachers(repos).await?,
        events: seed_events(repos).await?,
        feedback: seed_feedback(repos).await?,
        accounts: 0,
    };

    match &config.password {
        Some(password) => {
            summary.accounts = seed_accounts(repos, password, config.bcrypt_cost).await?;
        }
        None => info!("No seed password configured, skipping demo accounts"),
    }

    info!(
        backend = repos.backend_name(),
        books = summary.books,
        teachers = summary.teachers,
        events = summary.events,
        feedback = summary.feedback,
        accounts = summary.accounts,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Demo data seeded"
    );

    Ok(summary)
}

pub(crate) fn check_password(password: &str) -> Result<(), SeedError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SeedError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub(crate) fn hash(password: &str, cost: u32) -> Result<String, SeedError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Convenience used by the binary to print who was created.
pub fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role)
}
