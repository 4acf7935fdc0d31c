use std::env;
use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use chrono::{FixedOffset, NaiveDateTime, Utc};

const DEFAULT_SCHEDULE_PATH: &str = "schedule.xlsx";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 3;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "missing {} env var", name),
            ConfigError::Invalid(name, value) => write!(f, "invalid {} value: {}", name, value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tg_token: String,
    pub database_url: String,
    pub schedule_path: String,
    pub utc_offset: FixedOffset,
    pub poll_timeout: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tg_token = var("TG_TOKEN").ok_or(ConfigError::Missing("TG_TOKEN"))?;
        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let schedule_path =
            var("SCHEDULE_PATH").unwrap_or_else(|| DEFAULT_SCHEDULE_PATH.to_string());

        let offset_hours = match var("UTC_OFFSET_HOURS") {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::Invalid("UTC_OFFSET_HOURS", value.clone()))?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };
        let utc_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid("UTC_OFFSET_HOURS", offset_hours.to_string()))?;

        let poll_timeout = match var("POLL_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("POLL_TIMEOUT_SECS", value.clone()))?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Config {
            tg_token,
            database_url,
            schedule_path,
            utc_offset,
            poll_timeout,
        })
    }

    /// Current wall-clock time at the configured offset, without a timezone attached.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.utc_offset).naive_local()
    }
}
