//! Account service configuration.

use common::{ConfigError, DatabaseConfig, JwtConfig, ServiceConfig};

pub const SERVICE_NAME: &str = "account-service";
const ENV_PREFIX: &str = "ACCOUNT_SERVICE";

/// Account service configuration.
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when the signing secret is missing or the token TTL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            service: ServiceConfig::from_lookup(SERVICE_NAME, ENV_PREFIX, &lookup)?,
            database: DatabaseConfig::from_lookup(&lookup),
            jwt: JwtConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup() {
        let config = AccountServiceConfig::from_lookup(|key| match key {
            "AUTH_JWT_SECRET" => Some("s3cret".to_string()),
            "DATABASE_DSN" => Some("postgres://dsn".to_string()),
            "ACCOUNT_SERVICE_PORT" => Some("8080".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.service.port, 8080);
        assert_eq!(config.database.url, "postgres://dsn");
        assert_eq!(config.jwt.ttl_minutes, 60);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = AccountServiceConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("AUTH_JWT_SECRET"));
    }
}
