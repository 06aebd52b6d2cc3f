//! # EduZone Config
//!
//! Configuration types for the EduZone API.
//!
//! Every section is loaded from environment variables through a lookup function, so
//! tests can build a configuration from a plain map without touching the process
//! environment:
//!
//! - [`server`]: bind address, runtime environment, uploads, timeouts, log directory
//! - [`database`]: storage backend selection and PostgreSQL pool settings
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`auth`]: bcrypt cost and the demo login password
//!
//! # Example
//!
//! ```ignore
//! use eduzone_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod auth;
pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;
mod vars;

pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, DatabaseConnection, StorageBackend};
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::{Environment, ServerConfig};

use vars::Vars;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars::new(lookup);

        let server = ServerConfig::load(&vars)?;
        let database = DatabaseConfig::load(&vars)?;
        let jwt = JwtConfig::load(&vars)?;
        let cors = CorsConfig::load(&vars);
        let auth = AuthConfig::load(&vars, server.environment)?;

        Ok(Self {
            server,
            database,
            jwt,
            cors,
            auth,
        })
    }
}

/// The subset of the configuration the administration CLI needs.
///
/// Unlike [`AppConfig`] it does not require a token secret.
#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars::new(lookup);

        let server = ServerConfig::load(&vars)?;
        let database = DatabaseConfig::load(&vars)?;
        let auth = AuthConfig::load(&vars, server.environment)?;

        Ok(Self { database, auth })
    }
}
