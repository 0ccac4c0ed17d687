//! Role-tagged prompt messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// How a provider wants the messages of a prompt laid out.
///
/// Some endpoints reject or ignore system messages, so the whole prompt is
/// folded into a single user message for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFraming {
    #[default]
    RoleTagged,
    Flattened,
}

impl MessageFraming {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFraming::RoleTagged => "role_tagged",
            MessageFraming::Flattened => "flattened",
        }
    }
}

/// An ordered sequence of role-tagged messages sent to a text generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn system_user(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self::new(vec![Message::system(system), Message::user(user)])
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All message contents joined with a single space, trimmed.
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Single user message carrying the concatenated content.
    pub fn flattened(&self) -> Prompt {
        Prompt::new(vec![Message::user(self.text())])
    }

    pub fn framed(&self, framing: MessageFraming) -> Prompt {
        match framing {
            MessageFraming::RoleTagged => self.clone(),
            MessageFraming::Flattened => self.flattened(),
        }
    }

    /// Content of the last user message, used for diagnostics.
    pub fn user_content(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map_or("", |m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_joins_contents_into_one_user_message() {
        let prompt = Prompt::system_user("  You are a judge. ", "\nAnswer this.\n");
        let flat = prompt.flattened();

        assert_eq!(flat.messages().len(), 1);
        assert_eq!(flat.messages()[0].role, Role::User);
        assert_eq!(flat.messages()[0].content, "You are a judge. Answer this.");
    }

    #[test]
    fn test_role_tagged_framing_keeps_messages() {
        let prompt = Prompt::system_user("sys", "usr");
        assert_eq!(prompt.framed(MessageFraming::RoleTagged), prompt);
        assert_eq!(prompt.user_content(), "usr");
    }

    #[test]
    fn test_framing_serde() {
        let framing: MessageFraming = serde_json::from_str("\"flattened\"").unwrap();
        assert_eq!(framing, MessageFraming::Flattened);
        assert_eq!(MessageFraming::default().as_str(), "role_tagged");
    }
}
