//! Telegram configuration from TOML (`[telegram]` section)

use newsquiz_application::Destinations;
use newsquiz_domain::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Telegram configuration from TOML (`[telegram]` section)
///
/// # Example
///
/// ```toml
/// [telegram]
/// log_channel = "-1001234567890"
///
/// [telegram.channels]
/// english = "@daily_english_quiz"
/// spanish = "@daily_spanish_quiz"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelegramConfig {
    /// Environment variable holding the bot token.
    pub bot_token_env: String,
    /// Bot API base URL.
    pub api_url: String,
    /// Language name → chat id or `@channel` handle.
    pub channels: BTreeMap<String, String>,
    /// Channel receiving rejected questions and diagnostics.
    pub log_channel: Option<String>,
}

impl Default for FileTelegramConfig {
    fn default() -> Self {
        Self {
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            api_url: "https://api.telegram.org".to_string(),
            channels: BTreeMap::new(),
            log_channel: None,
        }
    }
}

impl FileTelegramConfig {
    pub fn resolve_bot_token(&self) -> Option<String> {
        std::env::var(&self.bot_token_env)
            .ok()
            .filter(|t| !t.is_empty())
    }

    /// Destinations keyed by normalized language; unparseable keys are skipped.
    pub fn to_destinations(&self) -> Destinations {
        let channels = self
            .channels
            .iter()
            .filter(|(_, chat)| !chat.trim().is_empty())
            .filter_map(|(name, chat)| Language::new(name).ok().map(|l| (l, chat.clone())))
            .collect();
        let log_channel = self
            .log_channel
            .clone()
            .filter(|chat| !chat.trim().is_empty());
        Destinations::new(channels, log_channel)
    }
}
