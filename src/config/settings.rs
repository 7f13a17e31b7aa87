//! Process settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/postgres";

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// TLS without certificate verification (managed hosting).
    pub ssl: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub http: HttpSettings,
    /// Argon2 time cost.
    pub credential_cost: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let production = get("NODE_ENV").is_some_and(|v| v == "production");
        let ssl = match get("DATABASE_SSL") {
            Some(v) => parse_bool("DATABASE_SSL", &v)?,
            None => production,
        };

        Ok(Settings {
            database: DatabaseSettings {
                url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?,
                ssl,
            },
            http: HttpSettings {
                host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
                port: parse_or("PORT", get("PORT"), 3000)?,
                allowed_origins: parse_origins(get("CORS_ORIGINS").as_deref()),
            },
            credential_cost: parse_or("CREDENTIAL_COST", get("CREDENTIAL_COST"), 2)?,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", v, e),
        }),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}

fn parse_origins(raw: Option<&str>) -> AllowedOrigins {
    let Some(raw) = raw else { return AllowedOrigins::Any };
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}
