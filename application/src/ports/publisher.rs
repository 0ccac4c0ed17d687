//! Publisher port
//!
//! Delivery of messages, quiz polls and images to destination channels.
//! From the pipeline's point of view every call is fire-and-forget: errors
//! are logged and counted, never retried and never fatal.

use async_trait::async_trait;
use newsquiz_domain::{Image, Poll};
use thiserror::Error;

/// Errors that can occur while delivering content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rejected by channel: {0}")]
    Rejected(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Timeout")]
    Timeout,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError>;

    async fn send_poll(&self, destination: &str, poll: &Poll) -> Result<(), DeliveryError>;

    async fn send_image(
        &self,
        destination: &str,
        image: &Image,
        caption: Option<&str>,
    ) -> Result<(), DeliveryError>;
}
