#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

pub use crate::bot::BotError;
pub use crate::config::Config;

use crate::bot::bot::init_bot;

pub mod bot;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod schedule;
pub mod telegram;

pub async fn start(config: Config) -> Result<(), BotError> {
    init_bot(&config).await
}
