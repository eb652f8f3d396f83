mod bot;
mod config;
mod db;
mod entities;
mod error;
mod format;
mod kinopoisk;
mod link;
mod storage;
mod telegram;

use std::{sync::Arc, time::Duration};

use crate::{
    bot::Bot, config::Config, kinopoisk::KinopoiskClient, storage::RequestLog,
    telegram::TelegramClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,kinobot=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    // One shared client; the default timeout applies to metadata calls,
    // long polls stretch it per request.
    let http = reqwest::Client::builder()
        .user_agent("kinobot/0.1")
        .timeout(Duration::from_secs(10))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = RequestLog::new(db);

    let kp = KinopoiskClient::new(
        http.clone(),
        config.kp_api_key.clone(),
        config.kp_base_url.clone(),
    );
    let tg = TelegramClient::new(http, &config.telegram_base_url, &config.bot_token);

    tracing::info!("starting long-poll loop");
    let bot =
        Arc::new(Bot { tg, kp, store, poll_timeout_secs: config.poll_timeout_secs });
    bot.run().await?;

    Ok(())
}
