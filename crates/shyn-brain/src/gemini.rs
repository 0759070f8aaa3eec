//! Google Gemini API client.
//!
//! Implements [`GenerativeClient`] against the Generative Language API:
//! streamed text generation (SSE) with grounding-metadata extraction, and
//! one-shot image generation against an image-capable model.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::debug;

use shyn_common::{BrainError, Citation, Role};

use crate::streaming::read_sse_data;
use crate::{GenerateRequest, GenerativeClient, InlineImage, StreamChunk};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub image_model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
        }
    }

    /// Create config from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, BrainError> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) => Ok(Self::new(key)),
            Err(_) => Err(BrainError::Api(
                "Gemini API not configured. Set GEMINI_API_KEY.".into(),
            )),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/{}:{}?key={}",
            GEMINI_API_BASE, model, method, self.config.api_key
        )
    }

    /// Build the JSON request body for a generation call.
    fn build_request_body(&self, request: &GenerateRequest) -> serde_json::Value {
        let contents: Vec<_> = request
            .turns
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Model => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": request.system_prompt }]
            },
            "generationConfig": {
                "temperature": request.temperature,
            }
        });

        if request.web_search {
            body["tools"] = serde_json::json!([{ "google_search": {} }]);
        }

        body
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BrainError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BrainError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BrainError::Api(format!("HTTP {status}: {text}")));
        }
        Ok(response)
    }
}

/// Extract the text and grounding citations carried by one streamed payload.
fn chunk_from_json(data: &serde_json::Value) -> StreamChunk {
    let mut chunk = StreamChunk::default();

    let Some(candidate) = data["candidates"].as_array().and_then(|c| c.first()) else {
        return chunk;
    };

    if let Some(parts) = candidate["content"]["parts"].as_array() {
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                chunk.text.push_str(text);
            }
        }
    }

    if let Some(grounding) = candidate["groundingMetadata"]["groundingChunks"].as_array() {
        for entry in grounding {
            if let Some(web) = entry.get("web") {
                chunk.citations.push(Citation {
                    title: web["title"].as_str().unwrap_or_default().to_string(),
                    uri: web["uri"].as_str().unwrap_or_default().to_string(),
                });
            }
        }
    }

    chunk
}

/// Find the first inline-data part in an image-generation response.
fn extract_inline_image(json: &serde_json::Value) -> Option<InlineImage> {
    let parts = json["candidates"]
        .as_array()?
        .first()?["content"]["parts"]
        .as_array()?;

    for part in parts {
        if let Some(inline) = part.get("inlineData") {
            return Some(InlineImage {
                mime_type: inline["mimeType"].as_str()?.to_string(),
                data: inline["data"].as_str()?.to_string(),
            });
        }
    }
    None
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn stream_generate(
        &self,
        request: &GenerateRequest,
        on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
    ) -> Result<(), BrainError> {
        let body = self.build_request_body(request);
        let url = format!(
            "{}&alt=sse",
            self.api_url(&self.config.model, "streamGenerateContent")
        );

        debug!(
            model = %self.config.model,
            turns = request.turns.len(),
            web_search = request.web_search,
            "Gemini streaming request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BrainError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let byte_stream = response.bytes_stream().map_err(std::io::Error::other);
        let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));

        read_sse_data(reader, |data| {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(data) {
                let chunk = chunk_from_json(&json);
                if !chunk.text.is_empty() || !chunk.citations.is_empty() {
                    on_chunk(chunk);
                }
            }
        })
        .await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>, BrainError> {
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });
        let url = self.api_url(&self.config.image_model, "generateContent");

        debug!(model = %self.config.image_model, "Gemini image request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BrainError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BrainError::Parse(e.to_string()))?;

        Ok(extract_inline_image(&json))
    }
}
