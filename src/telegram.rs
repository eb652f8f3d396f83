use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(client: reqwest::Client, base_url: &str, token: &str) -> Self {
        Self { client, base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), token) }
    }

    /// Long-polls for new updates. The per-request timeout is stretched past
    /// the server-side poll window so the shared client's short default does
    /// not cut the poll off.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> AppResult<Vec<Update>> {
        let body = GetUpdates { offset, timeout: timeout_secs, allowed_updates: &["message"] };

        let resp: ApiResponse<Vec<Update>> = self
            .client
            .post(format!("{}/getUpdates", self.base_url))
            .timeout(Duration::from_secs(timeout_secs + 10))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.into_result()
    }

    /// Sends a plain-text reply, optionally with a single inline URL button.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        button: Option<(&str, &str)>,
    ) -> AppResult<()> {
        let reply_markup = button.map(|(label, url)| InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton { text: label, url }]],
        });
        let body = SendMessage { chat_id, text, reply_markup };

        let resp: ApiResponse<serde_json::Value> = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.into_result().map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> AppResult<T> {
        if !self.ok {
            return Err(AppError::Telegram(
                self.description.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        self.result.ok_or_else(|| AppError::Telegram("response missing result".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}
