use std::{str::FromStr, time::Duration};

use crate::server::{
    error::{config::ConfigError, AppError},
    util::parse::parse_duration,
};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "bookshelf";
const DEFAULT_MONGODB_TIMEOUT_MS: u64 = 2000;
const DEFAULT_PRIMARY_RETRY_SECS: u64 = 30;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_JWT_EXPIRE: &str = "30d";
const DEFAULT_BCRYPT_COST: u32 = 10;

pub struct Config {
    pub port: u16,

    /// Unset means the service runs on local storage only.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub mongodb_timeout: Duration,
    pub primary_retry: Duration,

    pub data_dir: String,

    pub jwt_secret: String,
    pub jwt_expire: Duration,
    pub bcrypt_cost: u32,

    /// Unset means any origin.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from any variable source; empty values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let jwt_expire_raw = var("JWT_EXPIRE").unwrap_or_else(|| DEFAULT_JWT_EXPIRE.to_string());
        let jwt_expire = parse_duration(&jwt_expire_raw).ok_or_else(|| {
            invalid(
                "JWT_EXPIRE",
                &jwt_expire_raw,
                "expected a number of seconds or a number followed by s, m, h or d",
            )
        })?;

        let bcrypt_cost = parse_or("BCRYPT_COST", var("BCRYPT_COST"), DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid(
                "BCRYPT_COST",
                &bcrypt_cost.to_string(),
                "must be between 4 and 31",
            ));
        }

        Ok(Self {
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            mongodb_uri: var("MONGODB_URI"),
            mongodb_database: var("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mongodb_timeout: Duration::from_millis(parse_or(
                "MONGODB_TIMEOUT_MS",
                var("MONGODB_TIMEOUT_MS"),
                DEFAULT_MONGODB_TIMEOUT_MS,
            )?),
            primary_retry: Duration::from_secs(parse_or(
                "PRIMARY_RETRY_SECS",
                var("PRIMARY_RETRY_SECS"),
                DEFAULT_PRIMARY_RETRY_SECS,
            )?),
            data_dir: var("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            jwt_secret: var("JWT_SECRET")
                .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            jwt_expire,
            bcrypt_cost,
            cors_origin: var("CORS_ORIGIN"),
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(name, &raw, &e.to_string())),
    }
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
