use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

pub static CONF: Lazy<Config> = Lazy::new(|| Config::from_env().expect("Failed to load config"));

const DB_USERNAME_VAR: &str = "FRIENDS_DB_USERNAME";
const DB_PASSWORD_VAR: &str = "FRIENDS_DB_PASSWORD";
const DB_HOSTNAME_VAR: &str = "FRIENDS_DB_HOSTNAME";
const DB_PORT_VAR: &str = "FRIENDS_DB_PORT";
const DB_NAME_VAR: &str = "FRIENDS_DB_NAME";
const DB_MAX_CONNECTIONS_VAR: &str = "FRIENDS_DB_MAX_CONNECTIONS";

const ACTIX_WORKER_COUNT_VAR: &str = "FRIENDS_ACTIX_WORKER_COUNT";
const LOG_LEVEL_VAR: &str = "FRIENDS_LOG_LEVEL";

pub struct Config {
    pub db_username: String,
    pub db_password: String,
    pub db_hostname: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_max_connections: u32,

    pub actix_worker_count: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Ok(Config {
            db_username: env_var(DB_USERNAME_VAR)?,
            db_password: env_var(DB_PASSWORD_VAR)?,
            db_hostname: env_var(DB_HOSTNAME_VAR)?,
            db_port: env_var(DB_PORT_VAR)?,
            db_name: env_var(DB_NAME_VAR)?,
            db_max_connections: env_var_or(DB_MAX_CONNECTIONS_VAR, 48),

            actix_worker_count: env_var_or(ACTIX_WORKER_COUNT_VAR, num_cpus::get()),
            log_level: env_var_or(LOG_LEVEL_VAR, String::from("info")),
        })
    }

    pub fn database_uri(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_username, self.db_password, self.db_hostname, self.db_port, self.db_name,
        )
    }
}

fn env_var<T: FromStr>(key: &'static str) -> Result<T, ConfigError> {
    let var = std::env::var(key).map_err(|_| ConfigError::MissingVar(key))?;
    let var: T = var.parse().map_err(|_| ConfigError::InvalidVar(key))?;
    Ok(var)
}

fn env_var_or<T: FromStr>(key: &'static str, default: T) -> T {
    let Ok(var) = std::env::var(key) else {
        return default;
    };

    var.parse().unwrap_or(default)
}

#[derive(Clone, Copy, Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str),
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(key) => write!(f, "Missing environment variable '{}'", key),
            Self::InvalidVar(key) => write!(f, "Environment variable '{}' is invalid", key),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use friends_common::db::{create_db_async_pool, DbAsyncPool};

    use super::*;

    pub static DB_ASYNC_POOL: Lazy<DbAsyncPool> = Lazy::new(|| {
        futures::executor::block_on(create_db_async_pool(
            &CONF.database_uri(),
            CONF.db_max_connections,
        ))
    });
}
