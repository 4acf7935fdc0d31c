use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use crate::config::ConfigError;
use crate::db::StorageError;
use crate::schedule::LoadError;
use crate::telegram::error::TelegramError;

#[derive(Debug)]
pub enum BotError {
    TelegramError(TelegramError),
    StorageError(StorageError),
    LoadError(LoadError),
    ConfigError(ConfigError),
}

impl From<TelegramError> for BotError {
    fn from(error: TelegramError) -> Self {
        BotError::TelegramError(error)
    }
}

impl From<StorageError> for BotError {
    fn from(error: StorageError) -> Self {
        BotError::StorageError(error)
    }
}

impl From<LoadError> for BotError {
    fn from(error: LoadError) -> Self {
        BotError::LoadError(error)
    }
}

impl From<ConfigError> for BotError {
    fn from(error: ConfigError) -> Self {
        BotError::ConfigError(error)
    }
}

impl Error for BotError {}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BotError::TelegramError(err) => err.fmt(f),
            BotError::StorageError(err) => err.fmt(f),
            BotError::LoadError(err) => err.fmt(f),
            BotError::ConfigError(err) => err.fmt(f),
        }
    }
}
