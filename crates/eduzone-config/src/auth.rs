use std::fmt;

use crate::error::ConfigError;
use crate::server::Environment;
use crate::vars::Vars;

pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Clone)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
    /// When set, this literal password is accepted for any existing account.
    pub demo_login_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            demo_login_password: None,
        }
    }
}

impl AuthConfig {
    pub(crate) fn load<F>(vars: &Vars<F>, environment: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost: u32 = vars.parse_or("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                &bcrypt_cost.to_string(),
                "must be between 4 and 31",
            ));
        }

        let demo_login_password = vars.get("DEMO_LOGIN_PASSWORD");
        if demo_login_password.is_some() && environment.is_production() {
            return Err(ConfigError::DemoPasswordInProduction);
        }

        Ok(Self {
            bcrypt_cost,
            demo_login_password,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("demo_login_enabled", &self.demo_login_password.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_bounds() {
        let vars = Vars::new(|key: &str| (key == "BCRYPT_COST").then(|| "3".to_string()));
        assert!(AuthConfig::load(&vars, Environment::Development).is_err());
    }

    #[test]
    fn test_demo_password_allowed_outside_production() {
        let vars = Vars::new(|key: &str| (key == "DEMO_LOGIN_PASSWORD").then(|| "demo123".to_string()));
        let config = AuthConfig::load(&vars, Environment::Development).unwrap();
        assert_eq!(config.demo_login_password.as_deref(), Some("demo123"));
    }
}
