//! Model provider adapters (OpenAI-compatible HTTP endpoints).

mod factory;
mod openai_compatible;
mod openai_image;

pub use factory::{ProviderError, ProviderFactory};
pub use openai_compatible::OpenAiCompatibleGenerator;
pub use openai_image::OpenAiImageGenerator;
