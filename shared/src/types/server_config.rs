use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Shortest secret accepted at startup.
pub const MIN_SECRET_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("jwt secret must be set via the JWT_SECRET env var or auth.jwt_secret")]
    MissingSecret,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// HMAC key used to sign and verify access tokens.
    ///
    /// Prefer the `JWT_SECRET` environment variable; this field is the
    /// fallback for deployments that cannot inject env vars. Read once at
    /// startup, so changing it requires a restart, which also invalidates
    /// every outstanding token.
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl ServerConfig {
    /// Full bind address, e.g. `"127.0.0.1:8081"`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl AuthConfig {
    /// Resolve the secret from the process environment, then the config file.
    pub fn resolved_jwt_secret(&self) -> Result<String, ConfigError> {
        self.resolve_jwt_secret(std::env::var(JWT_SECRET_ENV).ok())
    }

    /// Resolve the secret with `env` taking priority over the config field.
    /// Empty values count as unset.
    pub fn resolve_jwt_secret(&self, env: Option<String>) -> Result<String, ConfigError> {
        let secret = env
            .filter(|s| !s.is_empty())
            .or_else(|| self.jwt_secret.clone())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidConfig(format!(
                "jwt_secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        Ok(secret)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

pub fn default_bind() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8081
}

pub fn default_database_url() -> String {
    "sqlite://town.db?mode=rwc".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_secret(c: char) -> String {
        std::iter::repeat(c).take(MIN_SECRET_LEN).collect()
    }

    #[test]
    fn env_secret_wins_over_file_secret() {
        let auth = AuthConfig {
            jwt_secret: Some(long_secret('f')),
        };
        let resolved = auth.resolve_jwt_secret(Some(long_secret('e'))).unwrap();
        assert_eq!(resolved, long_secret('e'));
    }

    #[test]
    fn empty_env_falls_back_to_file() {
        let auth = AuthConfig {
            jwt_secret: Some(long_secret('f')),
        };
        let resolved = auth.resolve_jwt_secret(Some(String::new())).unwrap();
        assert_eq!(resolved, long_secret('f'));
    }

    #[test]
    fn no_secret_anywhere_is_missing() {
        let auth = AuthConfig::default();
        assert!(matches!(
            auth.resolve_jwt_secret(None),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        let auth = AuthConfig::default();
        let err = auth.resolve_jwt_secret(Some("short".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn server_addr_joins_bind_and_port() {
        let server = ServerConfig {
            bind: "0.0.0.0".into(),
            port: 9000,
        };
        assert_eq!(server.addr(), "0.0.0.0:9000");
    }
}
