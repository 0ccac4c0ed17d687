//! Dry-run publisher that prints deliveries instead of sending them.

use async_trait::async_trait;
use colored::Colorize;
use newsquiz_application::{DeliveryError, Publisher};
use newsquiz_domain::{Image, Poll};

pub struct ConsolePublisher;

impl ConsolePublisher {
    pub fn render_text(destination: &str, text: &str) -> String {
        format!("{} {}\n{}\n", "[message]".cyan().bold(), destination, text)
    }

    pub fn render_poll(destination: &str, poll: &Poll) -> String {
        let mut output = format!(
            "{} {}\n{}\n",
            "[poll]".cyan().bold(),
            destination,
            poll.prompt
        );
        for (index, option) in poll.options.iter().enumerate() {
            let marker = if index == poll.correct_index {
                "*".green().to_string()
            } else {
                " ".to_string()
            };
            output.push_str(&format!("  {} {}. {}\n", marker, index + 1, option));
        }
        if !poll.explanation.is_empty() {
            output.push_str(&format!("  {}\n", poll.explanation.dimmed()));
        }
        output
    }

    pub fn render_image(destination: &str, image: &Image, caption: Option<&str>) -> String {
        format!(
            "{} {} ({}, {} bytes){}\n",
            "[image]".cyan().bold(),
            destination,
            image.mime_type,
            image.len(),
            caption.map(|c| format!(" {}", c)).unwrap_or_default()
        )
    }
}

#[async_trait]
impl Publisher for ConsolePublisher {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        println!("{}", Self::render_text(destination, text));
        Ok(())
    }

    async fn send_poll(&self, destination: &str, poll: &Poll) -> Result<(), DeliveryError> {
        println!("{}", Self::render_poll(destination, poll));
        Ok(())
    }

    async fn send_image(
        &self,
        destination: &str,
        image: &Image,
        caption: Option<&str>,
    ) -> Result<(), DeliveryError> {
        println!("{}", Self::render_image(destination, image, caption));
        Ok(())
    }
}
