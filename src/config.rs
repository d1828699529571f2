use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the backend API, e.g. `http://localhost:3000/api`.
    pub api_url: String,
    pub api_timeout: Duration,
    /// Token to start with instead of logging in.
    pub api_token: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to honour a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_number(&lookup, "PORT", 8080)?;
        let timeout_secs = parse_number(&lookup, "ADMIN_API_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            api_url: lookup("ADMIN_API_URL")
                .unwrap_or_else(|| "http://localhost:3000/api".to_string()),
            api_timeout: Duration::from_secs(timeout_secs),
            api_token: lookup("ADMIN_API_TOKEN").filter(|t| !t.is_empty()),
        })
    }
}

fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
