use std::env;

/// Configuration errors raised at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The environment variable '{0}' must be set")]
    MissingVar(&'static str),

    #[error("The environment variable '{0}' has an invalid value")]
    InvalidVar(&'static str),
}

/// Process-wide configuration, read once at startup and injected into the
/// services that need it. The JWT secret never lives anywhere else.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:finance.db".to_string());
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidVar("PORT"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
        })
    }
}
