pub use self::error::BotError;

pub mod bot;
pub mod commands;
pub mod error;
pub mod tags;
