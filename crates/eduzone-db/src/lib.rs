//! # EduZone DB
//!
//! Persistence layer for the EduZone API.
//!
//! Handlers never talk to a database directly. They go through the repository
//! traits in [`repositories`], bundled in [`Repositories`] and carried in the
//! application state. Two backends implement them:
//!
//! - [`postgres`]: SQLx over a bounded `PgPool`, with embedded migrations
//! - [`memory`]: typed in-memory tables for demos and tests
//!
//! # Example
//!
//! ```ignore
//! use eduzone_db::{Repositories, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::postgres(pool);
//!
//! let books = repos.books.list().await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repositories;

use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use eduzone_config::{DatabaseConfig, DatabaseConnection};

pub use error::StoreError;
pub use memory::MemoryDatabase;
pub use repositories::{
    BookRepository, EventRepository, FeedbackRepository, FormRepository, TeacherRepository,
    UserRepository,
};
pub use sqlx::PgPool;

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// Every repository the API uses, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub events: Arc<dyn EventRepository>,
    pub forms: Arc<dyn FormRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    backend: Backend,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            books: Arc::new(postgres::PgBookRepository::new(pool.clone())),
            teachers: Arc::new(postgres::PgTeacherRepository::new(pool.clone())),
            events: Arc::new(postgres::PgEventRepository::new(pool.clone())),
            forms: Arc::new(postgres::PgFormRepository::new(pool.clone())),
            feedback: Arc::new(postgres::PgFeedbackRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_memory(MemoryDatabase::default())
    }

    pub fn with_memory(db: MemoryDatabase) -> Self {
        Self {
            users: Arc::new(memory::MemoryUserRepository::new(db.clone())),
            books: Arc::new(memory::MemoryBookRepository::new(db.clone())),
            teachers: Arc::new(memory::MemoryTeacherRepository::new(db.clone())),
            events: Arc::new(memory::MemoryEventRepository::new(db.clone())),
            forms: Arc::new(memory::MemoryFormRepository::new(db.clone())),
            feedback: Arc::new(memory::MemoryFeedbackRepository::new(db)),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Round-trips a trivial query to check the backend is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}

/// Builds a bounded PostgreSQL pool from configuration.
///
/// Requests beyond `max_connections` wait up to `acquire_timeout` for a free
/// connection.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let options = match &config.connection {
        Some(DatabaseConnection::Url(url)) => url.parse::<PgConnectOptions>()?,
        Some(DatabaseConnection::Parts {
            host,
            port,
            user,
            password,
            database,
        }) => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(database);
            match password {
                Some(password) => options.password(password),
                None => options,
            }
        }
        None => {
            return Err(StoreError::NotConfigured(
                "no PostgreSQL connection settings".to_string(),
            ));
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies the embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
