//! Image generation port

use crate::ports::text_generator::GatewayError;
use async_trait::async_trait;
use newsquiz_domain::Image;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Produce one image for a free-text picture prompt.
    async fn generate_image(&self, prompt: &str) -> Result<Image, GatewayError>;
}
