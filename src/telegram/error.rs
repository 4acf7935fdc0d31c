use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use reqwest::Error as ReqwestError;
use serde::Deserialize;
use serde_json::error::Error as SerdeError;

const FORBIDDEN: i64 = 403;

/// Error body returned by the Bot API alongside a non-2xx status.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    pub error_code: i64,
    pub description: String,
}

impl ApiError {
    /// Falls back to the HTTP status and raw body when Telegram did not send its JSON error.
    pub fn from_response(status: u16, body: &str) -> ApiError {
        serde_json::from_str(body).unwrap_or_else(|_| ApiError {
            error_code: i64::from(status),
            description: body.trim().to_string(),
        })
    }
}

#[derive(Debug)]
pub enum TelegramError {
    NetworkError(ReqwestError),
    MalformedResponse(SerdeError),
    Unsuccessful(ApiError),
}

impl TelegramError {
    /// The recipient blocked the bot, left, or never started a chat with it.
    pub fn is_recipient_unreachable(&self) -> bool {
        matches!(self, TelegramError::Unsuccessful(err) if err.error_code == FORBIDDEN)
    }
}

impl From<ReqwestError> for TelegramError {
    fn from(error: ReqwestError) -> Self {
        TelegramError::NetworkError(error)
    }
}

impl From<SerdeError> for TelegramError {
    fn from(error: SerdeError) -> Self {
        TelegramError::MalformedResponse(error)
    }
}

impl From<ApiError> for TelegramError {
    fn from(error: ApiError) -> Self {
        TelegramError::Unsuccessful(error)
    }
}

impl Error for TelegramError {}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TelegramError::NetworkError(err) => err.fmt(f),
            TelegramError::MalformedResponse(err) => err.fmt(f),
            TelegramError::Unsuccessful(err) => {
                write!(f, "telegram error {}: {}", err.error_code, err.description)
            }
        }
    }
}
