//! OpenAI-compatible image generation adapter (`/images/generations`)

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use newsquiz_application::{GatewayError, ImageGenerator};
use newsquiz_domain::{Image, truncate};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct OpenAiImageGenerator {
    name: String,
    api_key: Option<String>,
    base_url: String,
    model: String,
    size: String,
    http_client: reqwest::Client,
}

impl OpenAiImageGenerator {
    pub fn new(
        provider: &str,
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            name: format!("{}/{}", provider, model),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
            size: "1024x1024".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ImageRequest<'a> {
        ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            response_format: "b64_json",
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_image(&self, prompt: &str) -> Result<Image, GatewayError> {
        debug!(model = %self.name, prompt_chars = prompt.chars().count(), "Requesting image");

        let mut builder = self
            .http_client
            .post(self.endpoint())
            .json(&self.build_request(prompt));
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "{} ({}): {}",
                self.name,
                status,
                truncate(&error_text, ERROR_BODY_CHARS)
            )));
        }

        let body: ImageResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Other(format!("invalid image body: {}", e)))?;

        decode_image(body)
    }
}

fn decode_image(body: ImageResponse) -> Result<Image, GatewayError> {
    let encoded = body
        .data
        .into_iter()
        .find_map(|d| d.b64_json)
        .ok_or(GatewayError::EmptyResponse)?;
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GatewayError::Other(format!("invalid base64 image: {}", e)))?;
    if bytes.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(Image::png(bytes))
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}
