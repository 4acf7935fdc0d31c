use dotenv::dotenv;
use log::warn;

use course_bot::{start, BotError, Config};

#[tokio::main]
async fn main() -> Result<(), BotError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = dotenv() {
        warn!("failed to load .env file: {}", err);
    }

    let config = Config::from_env()?;
    start(config).await
}
