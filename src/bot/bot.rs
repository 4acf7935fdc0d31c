use std::time::Duration;

use chrono::NaiveDateTime;
use log::{error, info, warn};
use tokio::time::sleep;

use crate::bot::commands::*;
use crate::bot::error::BotError;
use crate::config::Config;
use crate::db::DbClient;
use crate::schedule::ScheduleTable;
use crate::telegram::client::TelegramClient;
use crate::telegram::types::{CallbackQuery, IncomingMessage, Update};

const RETRY_DELAY: Duration = Duration::from_secs(5);

pub async fn init_bot(config: &Config) -> Result<(), BotError> {
    let table = ScheduleTable::load(&config.schedule_path)?;
    info!(
        "loaded {} class sessions from {}",
        table.sessions.len(),
        config.schedule_path
    );

    let db = DbClient::new(&config.database_url)?;
    let telegram_client = TelegramClient::new(config.tg_token.clone());

    if let Err(err) = telegram_client.set_my_commands(&BOT_COMMANDS).await {
        warn!("failed to register bot commands: {}", err);
    }

    info!("bot started");
    let mut offset = 0;
    loop {
        let updates = match telegram_client
            .get_updates(offset, config.poll_timeout)
            .await
        {
            Ok(updates) => updates,
            Err(err) => {
                error!("failed to fetch updates: {}", err);
                sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = update.update_id + 1;
            handle_update(&telegram_client, &db, &table, &update, config.now()).await;
        }
    }
}

pub async fn handle_update(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    update: &Update,
    now: NaiveDateTime,
) {
    if let Some(message) = &update.message {
        handle_message(telegram_client, db, table, message, now).await;
    }

    if let Some(post) = &update.channel_post {
        if let Err(err) = forward_post(telegram_client, db, post).await {
            error!("failed to forward channel post {}: {}", post.message_id, err);
        }
    }

    if let Some(query) = &update.callback_query {
        handle_callback(telegram_client, db, table, query, now).await;
    }
}

async fn handle_message(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    message: &IncomingMessage,
    now: NaiveDateTime,
) {
    let text = message.text_or_caption();
    let command = match (parse_command(text), &message.from) {
        (Some(command), Some(from)) => Some((command, from)),
        _ => None,
    };

    let ((command, payload), from) = match command {
        Some(command) => command,
        None => {
            if let Err(err) = forward_post(telegram_client, db, message).await {
                error!("failed to forward message {}: {}", message.message_id, err);
            }
            return;
        }
    };

    info!(
        "received command from: {}({}), message: {}",
        from.first_name, from.id, text
    );

    let user_id = from.id;
    let result = match command {
        Command::Start => start(telegram_client, user_id).await,
        Command::Help => help(telegram_client, user_id).await,
        Command::Tags => tags(telegram_client, user_id).await,
        Command::MyTags => my_tags(telegram_client, db, user_id).await,
        Command::Subscribe => subscribe(telegram_client, db, user_id, payload).await,
        Command::Unsubscribe => unsubscribe(telegram_client, db, user_id, payload).await,
        Command::UnsubscribeAll => unsubscribe_all(telegram_client, db, user_id).await,
        Command::Schedule => schedule_menu_command(telegram_client, user_id).await,
        Command::Day => {
            schedule(telegram_client, db, table, user_id, ScheduleView::Day, now).await
        }
        Command::Next => {
            schedule(telegram_client, db, table, user_id, ScheduleView::Next, now).await
        }
        Command::NextDay => {
            schedule(telegram_client, db, table, user_id, ScheduleView::NextDay, now).await
        }
        Command::Week => {
            schedule(telegram_client, db, table, user_id, ScheduleView::Week, now).await
        }
        Command::Debug => debug(telegram_client, db, table, user_id).await,
    };

    report(telegram_client, user_id, result).await;
}

async fn handle_callback(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    query: &CallbackQuery,
    now: NaiveDateTime,
) {
    info!(
        "received callback from: {}({}), data: {:?}",
        query.from.first_name, query.from.id, query.data
    );

    let result = callback(telegram_client, db, table, query, now).await;
    report(telegram_client, query.from.id, result).await;
}

async fn report(telegram_client: &TelegramClient, user_id: i64, result: Result<(), BotError>) {
    match result {
        Ok(()) => {}
        Err(BotError::StorageError(err)) => {
            error!("storage failure for user {}: {}", user_id, err);
            if let Err(err) = reply(telegram_client, user_id, STORAGE_FAILURE_TEXT).await {
                warn!("failed to notify user {} about storage failure: {}", user_id, err);
            }
        }
        Err(err) => error!("error handling update for user {}: {}", user_id, err),
    }
}
