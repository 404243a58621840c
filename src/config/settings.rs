//! Application settings loaded from environment variables.

use std::env;

use thiserror::Error;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MAX_JWT_EXPIRATION_MINUTES, MIN_JWT_SECRET_LENGTH,
};

/// Configuration errors. Any of these aborts startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set")]
    MissingSecret,

    #[error("JWT_SECRET must be at least {0} characters long")]
    SecretTooShort(usize),

    #[error("{0} is not a valid number or is out of range")]
    InvalidNumber(&'static str),
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Key rate limits on `X-Forwarded-For`/`X-Real-IP` instead of the peer
    /// address. Only safe behind a proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}

impl Config {
    /// Build a configuration from an explicit secret, using defaults elsewhere.
    ///
    /// # Errors
    /// Returns [`ConfigError::SecretTooShort`] if the secret is shorter than
    /// the minimum length.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort(MIN_JWT_SECRET_LENGTH));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: None,
            jwt_secret,
            jwt_expiration_minutes: DEFAULT_JWT_EXPIRATION_MINUTES,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            trust_proxy_headers: false,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// There is no fallback signing secret: a missing or short `JWT_SECRET`
    /// is an error in every build profile.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let mut config = Self::new(jwt_secret)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        config.redis_url = env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        if let Ok(raw) = env::var("JWT_EXPIRATION_MINUTES") {
            config.jwt_expiration_minutes = parse_expiration_minutes(&raw)?;
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Ok(raw) = env::var("SERVER_PORT") {
            config.server_port = raw
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("SERVER_PORT"))?;
        }
        config.trust_proxy_headers = env::var("TRUST_PROXY_HEADERS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(config)
    }

    /// Override the token lifetime, clamped to the accepted range.
    pub fn with_jwt_expiration_minutes(mut self, minutes: i64) -> Self {
        self.jwt_expiration_minutes = minutes.clamp(1, MAX_JWT_EXPIRATION_MINUTES);
        self
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse a token lifetime in minutes, within `1..=MAX_JWT_EXPIRATION_MINUTES`.
fn parse_expiration_minutes(raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse()
        .ok()
        .filter(|minutes: &i64| (1..=MAX_JWT_EXPIRATION_MINUTES).contains(minutes))
        .ok_or(ConfigError::InvalidNumber("JWT_EXPIRATION_MINUTES"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("too-short");
        assert_eq!(
            result.unwrap_err(),
            ConfigError::SecretTooShort(MIN_JWT_SECRET_LENGTH)
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::new("0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(config.jwt_expiration_minutes, DEFAULT_JWT_EXPIRATION_MINUTES);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::new("0123456789abcdef0123456789abcdef").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_expiration_minutes_range() {
        assert_eq!(parse_expiration_minutes("15"), Ok(15));
        assert_eq!(
            parse_expiration_minutes(&MAX_JWT_EXPIRATION_MINUTES.to_string()),
            Ok(MAX_JWT_EXPIRATION_MINUTES)
        );

        for raw in ["0", "-5", "abc", "", "100000000000000"] {
            assert_eq!(
                parse_expiration_minutes(raw),
                Err(ConfigError::InvalidNumber("JWT_EXPIRATION_MINUTES")),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_builder_clamps_expiration() {
        let config = Config::new("0123456789abcdef0123456789abcdef")
            .unwrap()
            .with_jwt_expiration_minutes(100_000_000_000_000);
        assert_eq!(config.jwt_expiration_minutes, MAX_JWT_EXPIRATION_MINUTES);
    }
}
