use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub kp_api_key: String,
    pub kp_base_url: String,
    pub telegram_base_url: String,
    pub database_url: String,
    pub poll_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bot_token = std::env::var("BOT_TOKEN").context("BOT_TOKEN is not set")?;

        // Missing API key is not fatal; lookups degrade to "unavailable".
        let kp_api_key = std::env::var("KP_API_KEY").unwrap_or_else(|_| "".to_string());
        let kp_base_url = std::env::var("KP_BASE_URL")
            .unwrap_or_else(|_| "https://api.kinopoisk.dev/v1.4/movie".to_string());

        let telegram_base_url = std::env::var("TELEGRAM_BASE_URL")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://history.db?mode=rwc".to_string());

        let poll_timeout_secs: u64 =
            std::env::var("POLL_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            bot_token,
            kp_api_key,
            kp_base_url,
            telegram_base_url,
            database_url,
            poll_timeout_secs,
        })
    }
}
