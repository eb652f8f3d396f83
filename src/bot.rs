use std::{sync::Arc, time::Duration};

use tracing::{error, info, warn};

use crate::{
    error::AppResult,
    format,
    kinopoisk::KinopoiskClient,
    link,
    storage::RequestLog,
    telegram::{Message, TelegramClient},
};

const RETRY_DELAY: Duration = Duration::from_secs(3);

pub struct Bot {
    pub tg: TelegramClient,
    pub kp: KinopoiskClient,
    pub store: RequestLog,
    pub poll_timeout_secs: u64,
}

impl Bot {
    pub async fn run(self: Arc<Self>) -> AppResult<()> {
        let mut offset = 0i64;

        loop {
            let updates = match self.tg.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(err) => {
                    warn!(error = %err, "getUpdates failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else { continue };

                let bot = Arc::clone(&self);
                tokio::spawn(async move {
                    if let Err(err) = bot.handle_message(&message).await {
                        error!(chat_id = message.chat.id, error = %err, "message handling failed");
                    }
                });
            }
        }
    }

    async fn handle_message(&self, message: &Message) -> AppResult<()> {
        let Some(text) = message.text.as_deref() else { return Ok(()) };

        match command(text) {
            Some("start") | Some("help") => {
                self.tg.send_message(message.chat.id, format::START_TEXT, None).await
            }
            Some("stats") => self.handle_stats(message.chat.id).await,
            // Unknown commands get no reply.
            Some(_) => Ok(()),
            None => self.handle_link(message, text).await,
        }
    }

    async fn handle_stats(&self, chat_id: i64) -> AppResult<()> {
        let stats = self.store.stats().await?;
        self.tg.send_message(chat_id, &format::stats_reply(&stats), None).await
    }

    async fn handle_link(&self, message: &Message, text: &str) -> AppResult<()> {
        let chat_id = message.chat.id;
        self.tg.send_message(chat_id, format::LOOKING_UP_TEXT, None).await?;

        let Some(movie_id) = link::extract_movie_id(text.trim()) else {
            return self.tg.send_message(chat_id, format::BAD_LINK_TEXT, None).await;
        };

        let Some(movie) = self.kp.get_movie(movie_id).await else {
            return self.tg.send_message(chat_id, format::UNAVAILABLE_TEXT, None).await;
        };

        let (user_id, username) = match &message.from {
            Some(user) => (user.id, user.username.as_deref()),
            None => (0, None),
        };
        self.store.append(user_id, username, movie_id, movie.rating).await?;
        info!(user_id, movie_id, rating = ?movie.rating, "logged movie request");

        self.tg
            .send_message(
                chat_id,
                &format::movie_reply(&movie),
                Some((format::OPEN_BUTTON_TEXT, &movie.url)),
            )
            .await
    }
}

/// Returns the command name for messages like `/stats` or `/stats@MyBot`.
fn command(text: &str) -> Option<&str> {
    let first = text.trim().split_whitespace().next()?;
    let cmd = first.strip_prefix('/')?;
    Some(cmd.split('@').next().unwrap_or(cmd))
}
