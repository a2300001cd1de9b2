//! Hugging Face inference API client
//!
//! Sends one blocking `POST` per prompt:
//!
//! ```json
//! {"inputs": "...", "parameters": {"max_new_tokens": 200, "temperature": 0.3, "return_full_text": false}}
//! ```
//!
//! and reads `generated_text` from the first element of the returned array.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sqlscribe_core::ServiceConfig;
use std::time::Duration;

use crate::adapter::{DescriptionService, GenerationError};

/// Sampling parameters sent with every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Blocking client for a Hugging Face text-generation endpoint
pub struct HuggingFaceClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    parameters: GenerationParameters,
}

impl HuggingFaceClient {
    /// Create a client from service settings and an optional API key
    ///
    /// A missing key is not an error here; every request will fail instead.
    pub fn from_config(
        config: &ServiceConfig,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.request_timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| GenerationError::ClientError(e.to_string()))?;

        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; column descriptions will not be generated",
                config.api_key_env
            );
        }

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            parameters: GenerationParameters {
                max_new_tokens: config.max_new_tokens,
                temperature: config.temperature,
                return_full_text: config.return_full_text,
            },
        })
    }

    /// Sampling parameters sent with each request
    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerationRequest<'a> {
        GenerationRequest {
            inputs: prompt,
            parameters: &self.parameters,
        }
    }

    fn parse_response(body: &str) -> Result<String, GenerationError> {
        let generated: Vec<GeneratedText> = serde_json::from_str(body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        generated
            .into_iter()
            .next()
            .map(|g| g.generated_text.trim().to_string())
            .ok_or_else(|| GenerationError::InvalidResponse("empty response array".to_string()))
    }
}

impl DescriptionService for HuggingFaceClient {
    fn name(&self) -> &'static str {
        "HuggingFace"
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        tracing::debug!(url = %self.api_url, "Requesting generated text");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::StatusError {
                status: status.as_u16(),
                message: body,
            });
        }

        Self::parse_response(&body)
    }
}
