//! Server configuration from the environment
//!
//! `.env` is loaded first (or `.env.test` when `APP_ENV=test`); real
//! environment variables always win over file values.

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "weather.db";
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} is required")]
    Missing(&'static str),
}

/// Backend settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database path
    pub database_url: String,
    pub pool_max_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            pool_max_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl AppConfig {
    /// Read the process environment; run [`load_dotenv`] first to pick up `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => defaults.port,
        };

        let pool_max_size = match lookup("DB_POOL_MAX_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "DB_POOL_MAX_SIZE",
                    expected: "positive integer",
                    value,
                })?,
            None => defaults.pool_max_size,
        };

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_FILE_NAME"))
            .map(|url| url.strip_prefix("file:").map(str::to_string).unwrap_or(url))
            .unwrap_or(defaults.database_url);

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_url,
            pool_max_size,
        })
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            expected: "IP address",
            value: self.host.clone(),
        })
    }
}

/// Outcome of [`load_dotenv`]
///
/// Start-up loads the file before tracing exists (it may set `RUST_LOG`), so
/// the outcome is reported afterwards with [`DotenvSource::log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotenvSource {
    Loaded(&'static str),
    Missing(&'static str),
}

impl DotenvSource {
    pub fn log(&self) {
        match self {
            DotenvSource::Loaded(file) => tracing::debug!("Loaded environment from {}", file),
            DotenvSource::Missing(file) => {
                tracing::debug!("No {} file found, using process environment only", file)
            }
        }
    }
}

/// Load `.env`, or `.env.test` when `APP_ENV=test`
pub fn load_dotenv() -> DotenvSource {
    let app_env = std::env::var("APP_ENV").ok();
    load_file(dotenv_file(app_env.as_deref()))
}

fn dotenv_file(app_env: Option<&str>) -> &'static str {
    match app_env {
        Some("test") => ".env.test",
        _ => ".env",
    }
}

fn load_file(file: &'static str) -> DotenvSource {
    match dotenvy::from_filename(file) {
        Ok(_) => DotenvSource::Loaded(file),
        Err(_) => DotenvSource::Missing(file),
    }
}
