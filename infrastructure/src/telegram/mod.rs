//! Telegram delivery adapter.

mod publisher;

pub use publisher::{MAX_MESSAGE_CHARS, TelegramPublisher, split_message};
