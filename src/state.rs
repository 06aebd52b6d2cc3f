use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use eduzone_cli::seeder::{SeedConfig, seed_demo_data};
use eduzone_config::{AppConfig, AuthConfig, CorsConfig, JwtConfig, ServerConfig, StorageBackend};
use eduzone_core::file_storage::{FileStorage, LocalFileStorage};
use eduzone_db::{Repositories, init_db_pool, run_migrations};

/// Public prefix under which uploaded files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub jwt_config: JwtConfig,
    pub auth_config: AuthConfig,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
    pub file_storage: Arc<dyn FileStorage>,
}

impl AppState {
    pub fn new(config: &AppConfig, repos: Repositories) -> Self {
        let file_storage = LocalFileStorage::new(
            config.server.upload_dir.clone(),
            UPLOADS_PREFIX,
            config.server.upload_max_bytes,
        );

        Self {
            repos,
            jwt_config: config.jwt.clone(),
            auth_config: config.auth.clone(),
            server_config: config.server.clone(),
            cors_config: config.cors.clone(),
            file_storage: Arc::new(file_storage),
        }
    }
}

/// Connects the configured backend, applies migrations and seeds demo data.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repos = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = init_db_pool(&config.database)
                .await
                .context("Failed to connect to database")?;

            if config.database.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            Repositories::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory backend, data is lost on restart");
            Repositories::in_memory()
        }
    };

    repos.ping().await.context("Database is not reachable")?;

    if config.database.seed_demo_data {
        let seed_config = SeedConfig::new(config.database.seed_admin_password.clone())
            .with_bcrypt_cost(config.auth.bcrypt_cost);
        seed_demo_data(&repos, &seed_config)
            .await
            .context("Failed to seed demo data")?;
    }

    tokio::fs::create_dir_all(&config.server.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.server.upload_dir.display()
            )
        })?;

    info!(
        backend = repos.backend_name(),
        environment = %config.server.environment,
        "Application state initialized"
    );

    Ok(AppState::new(config, repos))
}
