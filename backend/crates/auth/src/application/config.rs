//! Application Configuration
//!
//! Token settings for the Auth application layer. Built once at startup and
//! shared read-only behind an `Arc`.

use std::time::Duration;

use platform::crypto::{SecretKey, SigningAlgorithm};
use thiserror::Error;

/// Length of generated development secrets, in bytes
const DEV_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("{0} must not be empty")]
    EmptySecret(&'static str),

    #[error("JWT_KEY and JWT_REFRESH_KEY must differ")]
    SecretsNotDistinct,

    #[error("access token TTL must be shorter than refresh token TTL")]
    TtlOrder,
}

/// Auth application configuration
///
/// `Debug` output redacts both secrets.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token lifetime (5 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (1 day)
    pub refresh_token_ttl: Duration,
    /// MAC algorithm for both token kinds
    pub algorithm: SigningAlgorithm,
    /// Signs access tokens only
    pub access_secret: SecretKey,
    /// Signs refresh tokens only
    pub refresh_secret: SecretKey,
}

impl AuthConfig {
    pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(24 * 3600);

    /// Default TTLs and algorithm with the given secrets
    pub fn new(access_secret: SecretKey, refresh_secret: SecretKey) -> Result<Self, ConfigError> {
        let config = Self {
            access_token_ttl: Self::DEFAULT_ACCESS_TTL,
            refresh_token_ttl: Self::DEFAULT_REFRESH_TTL,
            algorithm: SigningAlgorithm::default(),
            access_secret,
            refresh_secret,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with two random secrets (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self {
            access_token_ttl: Self::DEFAULT_ACCESS_TTL,
            refresh_token_ttl: Self::DEFAULT_REFRESH_TTL,
            algorithm: SigningAlgorithm::default(),
            access_secret: SecretKey::random(DEV_SECRET_LEN),
            refresh_secret: SecretKey::random(DEV_SECRET_LEN),
        }
    }

    /// Load from process environment
    ///
    /// - `JWT_KEY`, `JWT_REFRESH_KEY` (required)
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES` (default 5)
    /// - `REFRESH_TOKEN_EXPIRE_MINUTES` (default 1440)
    /// - `TOKEN_ALGO` (default `HS256`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_secret = lookup("JWT_KEY").ok_or(ConfigError::Missing("JWT_KEY"))?;
        let refresh_secret =
            lookup("JWT_REFRESH_KEY").ok_or(ConfigError::Missing("JWT_REFRESH_KEY"))?;

        let access_token_ttl = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => parse_minutes("ACCESS_TOKEN_EXPIRE_MINUTES", &raw)?,
            None => Self::DEFAULT_ACCESS_TTL,
        };
        let refresh_token_ttl = match lookup("REFRESH_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => parse_minutes("REFRESH_TOKEN_EXPIRE_MINUTES", &raw)?,
            None => Self::DEFAULT_REFRESH_TTL,
        };
        let algorithm = match lookup("TOKEN_ALGO") {
            Some(raw) => raw
                .trim()
                .parse::<SigningAlgorithm>()
                .map_err(|e| ConfigError::Invalid {
                    var: "TOKEN_ALGO",
                    reason: e.to_string(),
                })?,
            None => SigningAlgorithm::default(),
        };

        let config = Self {
            access_token_ttl,
            refresh_token_ttl,
            algorithm,
            access_secret: SecretKey::from_bytes(access_secret.into_bytes()),
            refresh_secret: SecretKey::from_bytes(refresh_secret.into_bytes()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check what the token codec relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.is_empty() {
            return Err(ConfigError::EmptySecret("JWT_KEY"));
        }
        if self.refresh_secret.is_empty() {
            return Err(ConfigError::EmptySecret("JWT_REFRESH_KEY"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::SecretsNotDistinct);
        }
        if self.access_token_ttl >= self.refresh_token_ttl {
            return Err(ConfigError::TtlOrder);
        }
        Ok(())
    }
}

fn parse_minutes(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let minutes = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        })?;
    if minutes == 0 {
        return Err(ConfigError::Invalid {
            var,
            reason: "must be at least 1 minute".to_string(),
        });
    }
    let secs = minutes.checked_mul(60).ok_or_else(|| ConfigError::Invalid {
        var,
        reason: "too large".to_string(),
    })?;
    Ok(Duration::from_secs(secs))
}
