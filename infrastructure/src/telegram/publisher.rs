//! Telegram Bot API publisher
//!
//! Implements the [`Publisher`] port with `sendMessage`, `sendPoll` and a
//! multipart `sendPhoto`. Every Bot API reply carries an `ok` flag; `false`
//! means the request reached Telegram and was refused.

use async_trait::async_trait;
use newsquiz_application::{DeliveryError, Publisher};
use newsquiz_domain::{Image, Poll, truncate};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hard limit on a single `sendMessage` text.
pub const MAX_MESSAGE_CHARS: usize = 4096;
/// Hard limit on a photo caption.
pub const MAX_CAPTION_CHARS: usize = 1024;

pub struct TelegramPublisher {
    api_base: String,
    http_client: reqwest::Client,
}

impl TelegramPublisher {
    pub fn new(api_url: &str, bot_token: &str) -> Self {
        Self {
            api_base: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            http_client: reqwest::Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }

    async fn call<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<(), DeliveryError> {
        let response = self
            .http_client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Self::check(method, response).await
    }

    async fn check(method: &str, response: reqwest::Response) -> Result<(), DeliveryError> {
        let status = response.status();
        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| DeliveryError::Transport(format!("{} ({}): {}", method, status, e)))?;
        reply.into_result(method)
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        let destination = chat_id(destination)?;
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            debug!(chat = destination, chars = chunk.chars().count(), "sendMessage");
            self.call(
                "sendMessage",
                &SendMessage {
                    chat_id: destination,
                    text: &chunk,
                },
            )
            .await?;
        }
        Ok(())
    }

    async fn send_poll(&self, destination: &str, poll: &Poll) -> Result<(), DeliveryError> {
        let request = SendPoll::quiz(chat_id(destination)?, poll);
        debug!(chat = destination, "sendPoll");
        self.call("sendPoll", &request).await
    }

    async fn send_image(
        &self,
        destination: &str,
        image: &Image,
        caption: Option<&str>,
    ) -> Result<(), DeliveryError> {
        let destination = chat_id(destination)?;
        let part = Part::bytes(image.bytes.clone())
            .file_name(format!("quiz.{}", image.extension()))
            .mime_str(&image.mime_type)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let mut form = Form::new()
            .text("chat_id", destination.to_string())
            .part("photo", part);
        if let Some(caption) = caption {
            form = form.text("caption", truncate(caption, MAX_CAPTION_CHARS));
        }

        debug!(chat = destination, bytes = image.len(), "sendPhoto");
        let response = self
            .http_client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Self::check("sendPhoto", response).await
    }
}

fn chat_id(destination: &str) -> Result<&str, DeliveryError> {
    let trimmed = destination.trim();
    if trimmed.is_empty() {
        return Err(DeliveryError::InvalidDestination(
            "empty chat id".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Prefers breaking after a newline when one falls in the second half of a
/// chunk. Empty input yields a single empty chunk so that callers still send.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + max_chars).min(chars.len());
        if end < chars.len()
            && let Some(offset) = chars[start..end].iter().rposition(|&c| c == '\n')
            && offset >= max_chars / 2
        {
            end = start + offset + 1;
        }
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }
    chunks
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SendPoll<'a> {
    chat_id: &'a str,
    question: &'a str,
    options: &'a [String],
    #[serde(rename = "type")]
    kind: &'static str,
    correct_option_id: usize,
    #[serde(skip_serializing_if = "str::is_empty")]
    explanation: &'a str,
    is_anonymous: bool,
}

impl<'a> SendPoll<'a> {
    fn quiz(chat_id: &'a str, poll: &'a Poll) -> Self {
        Self {
            chat_id,
            question: &poll.prompt,
            options: &poll.options,
            kind: "quiz",
            correct_option_id: poll.correct_index,
            explanation: &poll.explanation,
            is_anonymous: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl ApiReply {
    fn into_result(self, method: &str) -> Result<(), DeliveryError> {
        if self.ok {
            Ok(())
        } else {
            Err(DeliveryError::Rejected(format!(
                "{}: {}",
                method,
                self.description.unwrap_or_else(|| "no description".to_string())
            )))
        }
    }
}
