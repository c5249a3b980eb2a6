use std::env;
use std::time::Duration;

use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DB_NAME: &str = "liongate";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_SURREAL_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("unsupported database type: {0}")]
    UnsupportedDatabase(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Surreal,
}

impl DatabaseKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Self::Postgres),
            "surrealdb" | "surreal" => Ok(Self::Surreal),
            other => Err(ConfigError::UnsupportedDatabase(other.to_string())),
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Self::Postgres => DEFAULT_POSTGRES_PORT,
            Self::Surreal => DEFAULT_SURREAL_PORT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
    /// Adds HSTS to responses, only set for `RUST_ENV=production`.
    pub include_hsts: bool,
}

/// Connection parameters for whichever store `kind` selects.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub kind: DatabaseKind,
    /// Full connection URL; when set it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub namespace: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub operation_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl: chrono::Duration,
    pub refresh_token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub enforce_password_strength: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
        let env_file = format!(".env.{}", app_env);
        match dotenvy::from_filename(&env_file) {
            Ok(_) => tracing::info!("Loaded environment file {}", env_file),
            Err(e) => tracing::debug!("No {} loaded: {}", env_file, e),
        }
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, fallback: &str| get(key).unwrap_or_else(|| fallback.to_string());

        let kind = DatabaseKind::parse(&get_or("DB_TYPE", "postgresql"))?;

        let database = DatabaseConfig {
            kind,
            url: get("DATABASE_URL"),
            host: get_or("DB_HOST", "localhost"),
            port: parse_or(get("DB_PORT"), "DB_PORT", kind.default_port())?,
            username: get_or("DB_USERNAME", ""),
            password: get_or("DB_PASSWORD", ""),
            name: get_or("DB_NAME", DEFAULT_DB_NAME),
            namespace: get_or("DB_NAMESPACE", DEFAULT_DB_NAME),
            ssl_mode: get_or("DB_SSL_MODE", "disable"),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 100)?,
            min_connections: parse_or(get("DB_MIN_CONNECTIONS"), "DB_MIN_CONNECTIONS", 10)?,
            operation_timeout: Duration::from_secs(parse_or(
                get("DB_TIMEOUT_SECS"),
                "DB_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let auth = AuthConfig {
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            access_token_ttl: duration_or(get("JWT_ACCESS_DURATION"), "JWT_ACCESS_DURATION", "15m")?,
            refresh_token_ttl: duration_or(
                get("JWT_REFRESH_DURATION"),
                "JWT_REFRESH_DURATION",
                "168h",
            )?,
            bcrypt_cost: bcrypt_cost(get("BCRYPT_COST"))?,
            enforce_password_strength: parse_or(
                get("ENFORCE_PASSWORD_STRENGTH"),
                "ENFORCE_PASSWORD_STRENGTH",
                false,
            )?,
        };

        Ok(Self {
            env: get_or("APP_ENV", "dev"),
            server: ServerConfig {
                host: get_or("SERVER_HOST", "0.0.0.0"),
                port: parse_or(get("SERVER_PORT"), "SERVER_PORT", 8080)?,
                cors_origins: get_or("CORS_ALLOWED_ORIGINS", cors::DEFAULT_ALLOWED_ORIGINS),
                include_hsts: get("RUST_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production")),
            },
            database,
            auth,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    fallback: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(fallback),
    }
}

fn bcrypt_cost(value: Option<String>) -> Result<u32, ConfigError> {
    let cost = parse_or(value, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
    if !BCRYPT_COST_RANGE.contains(&cost) {
        return Err(ConfigError::Invalid {
            key: "BCRYPT_COST",
            value: cost.to_string(),
        });
    }
    Ok(cost)
}

fn duration_or(
    value: Option<String>,
    key: &'static str,
    fallback: &str,
) -> Result<chrono::Duration, ConfigError> {
    let raw = value.unwrap_or_else(|| fallback.to_string());
    parse_duration(&raw).ok_or(ConfigError::Invalid { key, value: raw })
}

/// Parses `90`, `90s`, `15m`, `168h` or `7d`.
pub fn parse_duration(raw: &str) -> Option<chrono::Duration> {
    let raw = raw.trim();
    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: i64 = digits.parse().ok()?;

    match unit {
        "" | "s" => chrono::Duration::try_seconds(amount),
        "m" => chrono::Duration::try_minutes(amount),
        "h" => chrono::Duration::try_hours(amount),
        "d" => chrono::Duration::try_days(amount),
        _ => None,
    }
}
