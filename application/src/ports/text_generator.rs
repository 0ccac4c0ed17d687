//! Text generation port
//!
//! Defines the interface for turning a prompt into raw model output.

use async_trait::async_trait;
use newsquiz_domain::Prompt;
use thiserror::Error;

/// Errors that can occur while calling a model provider
///
/// Every variant means "no result" to the pipeline; callers decide whether
/// that is fatal (news) or degrades to a per-language soft failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Text generator backed by a language model
///
/// Implementations (adapters) live in the infrastructure layer. No output
/// schema is enforced here; JSON validation is the caller's job.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable identifier used in logs, e.g. `"openai/gpt-4o"`.
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw text of the reply.
    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError>;
}
