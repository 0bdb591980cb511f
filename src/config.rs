use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8090);
const DEFAULT_POSTGRES_HOST: &str = "db";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 10;
const DEFAULT_CONNECT_BACKOFF_SECS: u64 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("set DATABASE_URL, or POSTGRES_USER, POSTGRES_PASSWORD and POSTGRES_DB")]
    MissingDatabase,

    #[error("DATABASE_URL is not a valid postgres url: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),

    #[error("environment variable `{var}` has invalid value `{value}`")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub connect_backoff: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(ConfigError::InvalidDatabaseUrl)?,
            None => {
                let (Some(user), Some(password), Some(db)) = (
                    lookup("POSTGRES_USER"),
                    lookup("POSTGRES_PASSWORD"),
                    lookup("POSTGRES_DB"),
                ) else {
                    return Err(ConfigError::MissingDatabase);
                };
                let host = lookup("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_POSTGRES_HOST.into());
                let port = parse_or(&lookup, "POSTGRES_PORT", DEFAULT_POSTGRES_PORT)?;

                PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .password(&password)
                    .database(&db)
                    .ssl_mode(PgSslMode::Disable)
            }
        };

        Ok(Self {
            database,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(DEFAULT_BIND_ADDR))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            connect_attempts: parse_or(&lookup, "DB_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)?,
            connect_backoff: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_BACKOFF_SECS",
                DEFAULT_CONNECT_BACKOFF_SECS,
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}
