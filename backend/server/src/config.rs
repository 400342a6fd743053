use std::{
    env,
    fmt::Display,
    fs::read_to_string,
    io::ErrorKind,
    path::PathBuf,
    str::FromStr,
};

use thiserror::Error;
use tracing::{info, warn};

const SECRETS_DIR: &str = "/run/secrets";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read secret {name}: {source}")]
    MissingSecret {
        name: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogConfig {
    Local(PathBuf),
    Remote { url: String, key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub catalog: CatalogConfig,
    pub whatsapp_number: String,
    /// Bearer token for the `/admin` routes, open when unset.
    pub admin_token: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            catalog: catalog_config(env::var("CATALOG_PATH").ok())?,
            whatsapp_number: try_load("WHATSAPP_NUMBER", "96876347266")?,
            admin_token: read_optional_secret("ADMIN_TOKEN")?,
        })
    }
}

/// A `CATALOG_PATH` snapshot wins over the remote catalog.
fn catalog_config(path: Option<String>) -> Result<CatalogConfig, ConfigError> {
    match path {
        Some(path) => {
            info!("Serving catalog snapshot {path}");
            Ok(CatalogConfig::Local(path.into()))
        }
        None => {
            info!("CATALOG_PATH not set, using the remote catalog");
            Ok(CatalogConfig::Remote {
                url: try_load("CATALOG_URL", "http://localhost:54321")?,
                key: read_secret("CATALOG_API_KEY")?,
            })
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

fn read_secret(secret_name: &str) -> Result<String, ConfigError> {
    let path = format!("{SECRETS_DIR}/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|source| ConfigError::MissingSecret {
            name: secret_name.to_string(),
            source,
        })
}

fn read_optional_secret(secret_name: &str) -> Result<Option<String>, ConfigError> {
    match read_secret(secret_name) {
        Ok(secret) => Ok(Some(secret).filter(|secret| !secret.is_empty())),
        Err(ConfigError::MissingSecret { source, .. }) if source.kind() == ErrorKind::NotFound => {
            warn!("Secret {secret_name} not found, admin routes are open");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
