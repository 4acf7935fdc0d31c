use std::str::FromStr;

use chrono::NaiveDateTime;
use log::{info, warn};
use strum_macros::EnumString;

use crate::bot::error::BotError;
use crate::bot::tags::TAG_CATEGORIES;
use crate::db::{DbClient, Toggle};
use crate::dispatch::{deliver, dispatch, toggle_subscribe, InboundPost};
use crate::schedule::ScheduleTable;
use crate::telegram::client::TelegramClient;
use crate::telegram::helpers::{build_inline_keyboard_markup, button};
use crate::telegram::types::*;

pub const MENU_SUBSCRIPTIONS: &str = "📚 Подписки";
pub const MENU_SCHEDULE: &str = "📅 Расписание";
pub const MENU_HELP: &str = "ℹ️ Помощь";

const START_TEXT: &str = "Привет! Меня зовут Литик. Используй меню ниже 👇";
const NO_SUBSCRIPTIONS_TEXT: &str = "❗ Сначала подпишитесь на теги через /tags";
pub const STORAGE_FAILURE_TEXT: &str = "Ошибка доступа к базе подписок. Попробуйте позже.";

const HELP_TEXT: &str = r#"Бот присылает только те сообщения о семинарах и лекциях, которые вам нужны.

Вы сами выбираете, на что подписываться, а бот пересылает вам сообщения с этими хэштегами из общекурсового чата.

📝 Доступные команды:

/tags – меню подписок
/mytags – мои подписки
/unsubscribe_all – отписаться сразу от всех
/subscribe – подписаться, например /subscribe #папян
/unsubscribe – отписаться, например /unsubscribe #папян
/day – расписание на текущий день
/next – следующая пара
/nextday – расписание на следующий день
/week – расписание на семь дней вперёд

Важно! Для корректного расписания подпишитесь на всех своих семинарских преподавателей и на хэштег #лекция."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Command {
    #[strum(serialize = "/start")]
    Start,
    #[strum(serialize = "/help", serialize = "ℹ️ Помощь")]
    Help,
    #[strum(serialize = "/tags", serialize = "📚 Подписки")]
    Tags,
    #[strum(serialize = "/mytags")]
    MyTags,
    #[strum(serialize = "/subscribe")]
    Subscribe,
    #[strum(serialize = "/unsubscribe")]
    Unsubscribe,
    #[strum(serialize = "/unsubscribe_all")]
    UnsubscribeAll,
    #[strum(serialize = "/schedule", serialize = "📅 Расписание")]
    Schedule,
    #[strum(serialize = "/day")]
    Day,
    #[strum(serialize = "/next")]
    Next,
    #[strum(serialize = "/nextday")]
    NextDay,
    #[strum(serialize = "/week")]
    Week,
    #[strum(serialize = "/debug")]
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleView {
    Day,
    Next,
    NextDay,
    /// Seven messages, one per day.
    Week,
    /// The same seven days joined into a single message.
    WeekSummary,
}

/// Splits `/command@bot payload` or a menu button text into a command and its argument.
pub fn parse_command(text: &str) -> Option<(Command, Option<&str>)> {
    let text = text.trim();
    if let Ok(command) = Command::from_str(text) {
        return Some((command, None));
    }

    let mut parts = text.split_whitespace();
    let head = parts.next()?;
    let head = head.split('@').next().unwrap_or(head);
    let command = Command::from_str(head).ok()?;
    Some((command, parts.next()))
}

pub const BOT_COMMANDS: [BotCommand<'static>; 9] = [
    BotCommand {
        command: "start",
        description: "Запуск бота",
    },
    BotCommand {
        command: "help",
        description: "Помощь",
    },
    BotCommand {
        command: "tags",
        description: "Управление подписками",
    },
    BotCommand {
        command: "mytags",
        description: "Мои подписки",
    },
    BotCommand {
        command: "day",
        description: "Расписание на сегодня",
    },
    BotCommand {
        command: "next",
        description: "Следующая пара",
    },
    BotCommand {
        command: "nextday",
        description: "Расписание на завтра",
    },
    BotCommand {
        command: "week",
        description: "Расписание на неделю",
    },
    BotCommand {
        command: "schedule",
        description: "Меню расписания",
    },
];

fn main_menu() -> ReplyMarkup {
    let key = |text: &str| KeyboardButton {
        text: text.to_string(),
    };
    ReplyMarkup::ReplyKeyboardMarkup(ReplyKeyboardMarkup {
        keyboard: vec![
            vec![key(MENU_SUBSCRIPTIONS), key(MENU_SCHEDULE)],
            vec![key(MENU_HELP)],
        ],
        resize_keyboard: true,
    })
}

fn schedule_menu() -> ReplyMarkup {
    ReplyMarkup::InlineKeyboardMarkup(InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                button("📅 Сегодня", "schedule_day"),
                button("📅 Завтра", "schedule_nextday"),
            ],
            vec![button("📅 Неделя", "schedule_week")],
        ],
    })
}

fn subscriptions_menu() -> ReplyMarkup {
    ReplyMarkup::InlineKeyboardMarkup(InlineKeyboardMarkup {
        inline_keyboard: vec![vec![
            button("📌 Мои подписки", "show_mytags"),
            button("❌ Отписаться от всех", "unsubscribe_all"),
        ]],
    })
}

pub async fn reply(
    telegram_client: &TelegramClient,
    user_id: i64,
    text: &str,
) -> Result<(), BotError> {
    telegram_client
        .send_message(&Message {
            chat_id: user_id,
            text,
            ..Default::default()
        })
        .await?;
    Ok(())
}

pub async fn start(telegram_client: &TelegramClient, user_id: i64) -> Result<(), BotError> {
    telegram_client
        .send_message(&Message {
            chat_id: user_id,
            text: START_TEXT,
            reply_markup: Some(&main_menu()),
            ..Default::default()
        })
        .await?;
    Ok(())
}

pub async fn help(telegram_client: &TelegramClient, user_id: i64) -> Result<(), BotError> {
    reply(telegram_client, user_id, HELP_TEXT).await
}

pub async fn tags(telegram_client: &TelegramClient, user_id: i64) -> Result<(), BotError> {
    for (category, tags) in TAG_CATEGORIES.iter() {
        let buttons = tags
            .iter()
            .map(|tag| button(tag, &format!("subscribe:{}", tag)))
            .collect::<Vec<InlineKeyboardButton>>();
        let markup = ReplyMarkup::InlineKeyboardMarkup(build_inline_keyboard_markup(buttons, 2));

        telegram_client
            .send_message(&Message {
                chat_id: user_id,
                text: &format!("📚 <b>{}</b>", category),
                parse_mode: Some(PARSE_MODE_HTML),
                reply_markup: Some(&markup),
                ..Default::default()
            })
            .await?;
    }

    telegram_client
        .send_message(&Message {
            chat_id: user_id,
            text: "🔽 Управление:",
            reply_markup: Some(&subscriptions_menu()),
            ..Default::default()
        })
        .await?;
    Ok(())
}

pub async fn my_tags(
    telegram_client: &TelegramClient,
    db: &DbClient,
    user_id: i64,
) -> Result<(), BotError> {
    let tags = db.get_user_tags(user_id)?;
    if tags.is_empty() {
        reply(telegram_client, user_id, "У тебя пока нет подписок").await
    } else {
        let text = format!("📌 Твои подписки:\n{}", tags.join("\n"));
        reply(telegram_client, user_id, &text).await
    }
}

/// Tags typed by the user must start with `#`; the store itself accepts any string.
fn validate_tag<'a>(command: &str, payload: Option<&'a str>) -> Result<&'a str, String> {
    match payload {
        None => Err(format!("❗ Используй: /{} #тег", command)),
        Some(tag) if !tag.starts_with('#') => Err("❗ Тег должен начинаться с #".to_string()),
        Some(tag) => Ok(tag),
    }
}

pub async fn subscribe(
    telegram_client: &TelegramClient,
    db: &DbClient,
    user_id: i64,
    payload: Option<&str>,
) -> Result<(), BotError> {
    let tag = match validate_tag("subscribe", payload) {
        Ok(tag) => tag,
        Err(text) => return reply(telegram_client, user_id, &text).await,
    };

    let text = if db.subscribe_if_absent(user_id, tag)? {
        format!("✅ Подписка на {} оформлена", tag)
    } else {
        format!("⚠️ Ты уже подписан на {}", tag)
    };
    reply(telegram_client, user_id, &text).await
}

pub async fn unsubscribe(
    telegram_client: &TelegramClient,
    db: &DbClient,
    user_id: i64,
    payload: Option<&str>,
) -> Result<(), BotError> {
    let tag = match validate_tag("unsubscribe", payload) {
        Ok(tag) => tag,
        Err(text) => return reply(telegram_client, user_id, &text).await,
    };

    let text = if db.unsubscribe_if_present(user_id, tag)? {
        format!("❌ Отписка от {} выполнена", tag)
    } else {
        format!("⚠️ Ты не подписан на {}", tag)
    };
    reply(telegram_client, user_id, &text).await
}

pub async fn unsubscribe_all(
    telegram_client: &TelegramClient,
    db: &DbClient,
    user_id: i64,
) -> Result<(), BotError> {
    db.remove_all_subscriptions(user_id)?;
    reply(telegram_client, user_id, "❌ Ты отписался от всех тегов").await
}

pub async fn schedule_menu_command(
    telegram_client: &TelegramClient,
    user_id: i64,
) -> Result<(), BotError> {
    telegram_client
        .send_message(&Message {
            chat_id: user_id,
            text: "Выберите вариант расписания:",
            reply_markup: Some(&schedule_menu()),
            ..Default::default()
        })
        .await?;
    Ok(())
}

pub async fn schedule(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    user_id: i64,
    view: ScheduleView,
    now: NaiveDateTime,
) -> Result<(), BotError> {
    let tags = db.get_user_tags(user_id)?;
    info!("schedule {:?} for user: {}, tags: {:?}", view, user_id, tags);

    if tags.is_empty() {
        return reply(telegram_client, user_id, NO_SUBSCRIPTIONS_TEXT).await;
    }

    let texts = match view {
        ScheduleView::Day => vec![table.day_view(&tags, None, now)],
        ScheduleView::Next => vec![table.next_class_view(&tags, now)],
        ScheduleView::NextDay => vec![table.next_day_view(&tags, now)],
        ScheduleView::Week => table.week_days(&tags, now),
        ScheduleView::WeekSummary => vec![table.week_view(&tags, now)],
    };

    for text in texts {
        reply(telegram_client, user_id, &text).await?;
    }
    Ok(())
}

pub async fn debug(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    user_id: i64,
) -> Result<(), BotError> {
    let tags = db.get_user_tags(user_id)?;
    let text = format!(
        "🔎 Debug info:\nUser tags: {:?}\n\nPreview (first rows):\n{}",
        tags,
        table.preview(10)
    );
    reply(telegram_client, user_id, &text).await
}

pub async fn toggle(
    telegram_client: &TelegramClient,
    db: &DbClient,
    query_id: &str,
    user_id: i64,
    tag: &str,
) -> Result<(), BotError> {
    let result = toggle_subscribe(db, user_id, tag);
    let text = match &result {
        Ok(Toggle::Subscribed) => format!("✅ Подписка на {}", tag),
        Ok(Toggle::Unsubscribed) => format!("❌ Отписка от {}", tag),
        Err(_) => STORAGE_FAILURE_TEXT.to_string(),
    };

    telegram_client
        .answer_callback_query(&AnswerCallbackQuery {
            callback_query_id: query_id,
            text: Some(&text),
        })
        .await?;
    result?;
    Ok(())
}

/// Handles an inline keyboard press. The query is always answered, even when the action fails.
pub async fn callback(
    telegram_client: &TelegramClient,
    db: &DbClient,
    table: &ScheduleTable,
    query: &CallbackQuery,
    now: NaiveDateTime,
) -> Result<(), BotError> {
    let user_id = query.from.id;
    let data = query.data.as_deref().unwrap_or("");

    if let Some(tag) = data.strip_prefix("subscribe:") {
        return toggle(telegram_client, db, &query.id, user_id, tag).await;
    }

    let result = match data {
        "show_mytags" => my_tags(telegram_client, db, user_id).await,
        "unsubscribe_all" => unsubscribe_all(telegram_client, db, user_id).await,
        "schedule_day" => {
            schedule(telegram_client, db, table, user_id, ScheduleView::Day, now).await
        }
        "schedule_nextday" => {
            schedule(telegram_client, db, table, user_id, ScheduleView::NextDay, now).await
        }
        "schedule_week" => {
            schedule(telegram_client, db, table, user_id, ScheduleView::WeekSummary, now).await
        }
        _ => {
            warn!("unknown callback data: {}", data);
            Ok(())
        }
    };

    telegram_client
        .answer_callback_query(&AnswerCallbackQuery {
            callback_query_id: &query.id,
            ..Default::default()
        })
        .await?;
    result
}

/// Forwards a tagged message to its subscribers, returning how many received it.
pub async fn forward_post(
    telegram_client: &TelegramClient,
    db: &DbClient,
    message: &IncomingMessage,
) -> Result<usize, BotError> {
    let post = InboundPost::from(message);
    let actions = dispatch(db, &post)?;
    if actions.is_empty() {
        return Ok(0);
    }

    info!(
        "forwarding message {} from chat {} to {} users",
        post.message_id,
        post.chat_id,
        actions.len()
    );
    Ok(deliver(telegram_client, &actions).await)
}
