//! Process configuration, read once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `DB_HOST` | `127.0.0.1` |
//! | `DB_PORT` | `5432` |
//! | `DB_USER` | `postgres` |
//! | `DB_PASSWORD` | unset (blank counts as unset) |
//! | `DB_NAME` | `shop` |
//! | `DB_POOL_MAX` | `10` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `APP_ENV` | `production` |
//! | `BODY_LIMIT_BYTES` | `102400` |

use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// `None` connects without a password.
    pub password: Option<String>,
    pub database: String,
    pub max_connections: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    /// Raw storage messages are only returned to clients in development.
    pub fn exposes_error_detail(self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db = DbConfig {
            host: text("DB_HOST", "127.0.0.1").trim().to_string(),
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            user: text("DB_USER", "postgres"),
            password: lookup("DB_PASSWORD")
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            database: text("DB_NAME", "shop"),
            max_connections: parse_or(&lookup, "DB_POOL_MAX", 10)?,
        };

        Ok(AppConfig {
            db,
            host: text("HOST", "0.0.0.0"),
            port: parse_or(&lookup, "PORT", 3000)?,
            environment: lookup("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(Environment::Production),
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", 100 * 1024)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(v) => Ok(v),
            Err(_) => Err(ConfigError::Invalid { var, value: raw }),
        },
    }
}
