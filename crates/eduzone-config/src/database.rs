use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::vars::Vars;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{}', expected postgres or memory",
                other
            )),
        }
    }
}

/// How to reach PostgreSQL.
///
/// The discrete form keeps passwords with URL-reserved characters usable without
/// percent-encoding.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConnection {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// `None` only for the in-memory backend.
    pub connection: Option<DatabaseConnection>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
    pub seed_demo_data: bool,
    pub seed_admin_password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            connection: None,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: true,
            seed_demo_data: false,
            seed_admin_password: None,
        }
    }
}

impl DatabaseConfig {
    pub(crate) fn load<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = vars.parse_or("STORAGE_BACKEND", StorageBackend::Postgres)?;

        let connection = match backend {
            StorageBackend::Memory => None,
            StorageBackend::Postgres => Some(Self::load_connection(vars)?),
        };

        let max_connections: u32 = vars.parse_or("DB_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            return Err(ConfigError::invalid(
                "DB_MAX_CONNECTIONS",
                "0",
                "must be at least 1",
            ));
        }

        Ok(Self {
            backend,
            connection,
            max_connections,
            acquire_timeout: Duration::from_secs(vars.parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            run_migrations: vars.flag_or("RUN_MIGRATIONS", true)?,
            // The in-memory backend starts empty, so it is seeded unless told otherwise
            seed_demo_data: vars.flag_or("SEED_DEMO_DATA", backend == StorageBackend::Memory)?,
            seed_admin_password: vars.get("SEED_ADMIN_PASSWORD"),
        })
    }

    fn load_connection<F>(vars: &Vars<F>) -> Result<DatabaseConnection, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = vars.get("DATABASE_URL") {
            return Ok(DatabaseConnection::Url(url));
        }

        if vars.get("DB_HOST").is_none() {
            return Err(ConfigError::Missing("DATABASE_URL".to_string()));
        }

        Ok(DatabaseConnection::Parts {
            host: vars.require("DB_HOST")?,
            port: vars.parse_or("DB_PORT", 5432)?,
            user: vars.require("DB_USER")?,
            password: vars.get("DB_PASSWORD"),
            database: vars.require("DB_NAME")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<DatabaseConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        DatabaseConfig::load(&Vars::new(|key: &str| map.get(key).map(|v| v.to_string())))
    }

    #[test]
    fn test_url_takes_precedence() {
        let config = load(&[
            ("DATABASE_URL", "postgres://u:p@localhost/eduzone"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(
            config.connection,
            Some(DatabaseConnection::Url("postgres://u:p@localhost/eduzone".into()))
        );
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_discrete_settings() {
        let config = load(&[
            ("DB_HOST", "db"),
            ("DB_USER", "school"),
            ("DB_NAME", "eduzone"),
            ("DB_PASSWORD", "p@ss/word"),
        ])
        .unwrap();
        assert_eq!(
            config.connection,
            Some(DatabaseConnection::Parts {
                host: "db".into(),
                port: 5432,
                user: "school".into(),
                password: Some("p@ss/word".into()),
                database: "eduzone".into(),
            })
        );
    }

    #[test]
    fn test_discrete_settings_require_user_and_name() {
        let err = load(&[("DB_HOST", "db"), ("DB_NAME", "eduzone")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_USER".into()));
    }

    #[test]
    fn test_memory_backend_needs_no_connection_and_seeds() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert!(config.connection.is_none());
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_debug_hides_url() {
        let debug = format!("{:?}", DatabaseConnection::Url("postgres://u:secret@h/db".into()));
        assert!(!debug.contains("secret"));
    }
}
