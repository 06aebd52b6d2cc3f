use std::fmt;

use crate::error::ConfigError;
use crate::vars::Vars;

pub const MIN_SECRET_BYTES: usize = 16;
pub const DEFAULT_EXPIRY_SECS: i64 = 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiry_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_secs,
        }
    }

    pub(crate) fn load<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = vars.require("JWT_SECRET")?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                "<redacted>",
                format!("must be at least {} bytes", MIN_SECRET_BYTES),
            ));
        }

        let expiry_secs: i64 = vars.parse_or("JWT_EXPIRY_SECS", DEFAULT_EXPIRY_SECS)?;
        if expiry_secs <= 0 {
            return Err(ConfigError::invalid(
                "JWT_EXPIRY_SECS",
                &expiry_secs.to_string(),
                "must be positive",
            ));
        }

        Ok(Self {
            secret,
            expiry_secs,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_secs", &self.expiry_secs)
            .finish()
    }
}
