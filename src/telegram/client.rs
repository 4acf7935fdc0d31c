use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::{from_str, from_value, Value};

use super::error::{ApiError, TelegramError};
use super::types::*;

const ALLOWED_UPDATES: [&str; 3] = ["message", "channel_post", "callback_query"];

pub struct TelegramClient {
    token: String,
    domain: String,
}

impl TelegramClient {
    pub fn new(token: String) -> TelegramClient {
        TelegramClient {
            token,
            domain: String::from("https://api.telegram.org"),
        }
    }

    #[allow(dead_code)]
    pub fn new_with(token: String, domain: String) -> TelegramClient {
        TelegramClient { token, domain }
    }

    pub async fn send_message<'a>(&self, message: &Message<'a>) -> Result<String, TelegramError> {
        let resp = self.call("sendMessage", message).await?;
        Ok(format!("{}", resp["message_id"]))
    }

    pub async fn forward_message(&self, forward: &ForwardMessage) -> Result<String, TelegramError> {
        let resp = self.call("forwardMessage", forward).await?;
        Ok(format!("{}", resp["message_id"]))
    }

    pub async fn answer_callback_query<'a>(
        &self,
        answer: &AnswerCallbackQuery<'a>,
    ) -> Result<(), TelegramError> {
        self.call("answerCallbackQuery", answer).await?;
        Ok(())
    }

    pub async fn set_my_commands<'a>(
        &self,
        commands: &'a [BotCommand<'a>],
    ) -> Result<(), TelegramError> {
        self.call("setMyCommands", &SetMyCommands { commands }).await?;
        Ok(())
    }

    /// Long-polls for updates newer than `offset`, waiting up to `timeout` seconds.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdates {
            offset,
            timeout,
            allowed_updates: &ALLOWED_UPDATES,
        };
        let resp = self.call("getUpdates", &request).await?;
        Ok(from_value(resp)?)
    }

    async fn call<T: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &T,
    ) -> Result<Value, TelegramError> {
        let url = format!("{}/bot{}/{}", self.domain, self.token, method);
        let resp: Response = Client::new().post(&url).json(body).send().await?;

        if resp.status().is_success() {
            let mut resp: Value = from_str(&resp.text().await?)?;
            Ok(resp
                .get_mut("result")
                .map(Value::take)
                .unwrap_or_default())
        } else {
            let status = resp.status().as_u16();
            Err(ApiError::from_response(status, &resp.text().await?).into())
        }
    }
}
