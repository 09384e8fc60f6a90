use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::types::server_config::{AppConfig, ConfigError, MIN_SECRET_LEN};

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    debug!("Processing file: {}", path.display());

    if contents.trim().is_empty() {
        error!("Configuration file is empty");
        return Err(ConfigError::InvalidConfig("empty file".into()));
    }

    let config: AppConfig = toml::from_str(&contents)?;

    info!("Configuration loaded successfully");

    validate_config(&config)?;

    info!("Config validated");

    Ok(config)
}

/// Like [`load_config`], but a missing file yields the built-in defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    match load_config(path) {
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            Ok(AppConfig::default())
        }
        other => other,
    }
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.bind.trim().is_empty() {
        return Err(ConfigError::InvalidConfig("bind cannot be empty".into()));
    }

    if config.database.url.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "database url cannot be empty".into(),
        ));
    }

    // The env var may still override this at startup, but a short secret in
    // the file is rejected up front.
    if let Some(secret) = config.auth.jwt_secret.as_deref() {
        if !secret.is_empty() && secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidConfig(format!(
                "jwt_secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }
    }

    Ok(())
}
