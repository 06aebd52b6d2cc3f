use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::vars::Vars;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" | "testing" => Ok(Self::Test),
            other => Err(format!(
                "unknown environment '{}', expected development, production or test",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    /// Directory uploaded form documents are written to and served from.
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from("public/uploads"),
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_dir: PathBuf::from("storage/logs"),
        }
    }
}

impl ServerConfig {
    pub(crate) fn load<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // NODE_ENV is accepted as a fallback for older deployment manifests
        let environment = match vars.get("APP_ENV") {
            Some(_) => vars.parse_or("APP_ENV", Environment::Development)?,
            None => vars.parse_or("NODE_ENV", Environment::Development)?,
        };

        let timeout_secs: u64 = vars.parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "REQUEST_TIMEOUT_SECS",
                "0",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            environment,
            host: vars.get("HOST").unwrap_or(defaults.host),
            port: vars.parse_or("PORT", DEFAULT_PORT)?,
            upload_dir: vars
                .get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            upload_max_bytes: vars.parse_or("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
            request_timeout: Duration::from_secs(timeout_secs),
            log_dir: vars
                .get("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        let vars = Vars::new(|key: &str| match key {
            "APP_ENV" => Some("test".into()),
            "NODE_ENV" => Some("production".into()),
            _ => None,
        });
        let config = ServerConfig::load(&vars).unwrap();
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let vars = Vars::new(|key: &str| (key == "REQUEST_TIMEOUT_SECS").then(|| "0".to_string()));
        assert!(ServerConfig::load(&vars).is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
