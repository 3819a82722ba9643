use crate::utils::AppError;
use std::env;

/// Token lifetime in days when `JWT_LIFE_TIME` is absent or not a number.
pub const DEFAULT_JWT_LIFE_TIME_DAYS: i64 = 7;
/// Longest accepted token lifetime; larger values fall back to the default.
pub const MAX_JWT_LIFE_TIME_DAYS: i64 = 3650;
pub const DEFAULT_DATABASE_NAME: &str = "book-store";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_life_time_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let database_url = required("MONGODB_CONNECTION_URI")?;
        let jwt_secret = required("JWT_SECRET")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => 8080,
        };

        let jwt_life_time_days = match lookup("JWT_LIFE_TIME").map(|raw| raw.parse::<i64>()) {
            Some(Ok(days)) if (1..=MAX_JWT_LIFE_TIME_DAYS).contains(&days) => days,
            Some(_) => {
                log::warn!(
                    "JWT_LIFE_TIME must be between 1 and {} days, using {}",
                    MAX_JWT_LIFE_TIME_DAYS,
                    DEFAULT_JWT_LIFE_TIME_DAYS
                );
                DEFAULT_JWT_LIFE_TIME_DAYS
            }
            None => DEFAULT_JWT_LIFE_TIME_DAYS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            database_name: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            jwt_secret,
            jwt_life_time_days,
        })
    }
}
