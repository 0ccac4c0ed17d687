//! Prompt domain
//!
//! Role-tagged prompts and the templates that build them for every stage of
//! the daily run.

pub mod message;
pub mod template;

pub use message::{Message, MessageFraming, Prompt, Role};
pub use template::PromptTemplate;
