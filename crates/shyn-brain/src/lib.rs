//! The assistant core ("brain") of the SAR platform.
//!
//! Owns a single live conversation against a hosted generative model with:
//! - Streaming (SSE) replies with grounding citations
//! - Identity / mode / personality switching via session rebuilds
//! - One-shot image generation
//! - Transcript and personality persistence via `shyn-memory`

pub mod brain;
pub mod gemini;
pub mod prompt;
pub mod session;
pub mod streaming;

use async_trait::async_trait;

use shyn_common::{BrainError, Citation, Role};

pub use brain::{Brain, LINK_ERROR_MARKER};
pub use gemini::{GeminiClient, GeminiConfig};
pub use session::Session;

/// One role/text pair in the provider-shaped conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// A fully assembled generation request: everything the provider needs for
/// one streamed reply.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// System instruction prepended to the conversation.
    pub system_prompt: String,
    /// Conversation history, ending with the new user turn.
    pub turns: Vec<Turn>,
    /// Sampling temperature (the personality's creativity value).
    pub temperature: f64,
    /// Whether the model may invoke the provider's web-search tool.
    pub web_search: bool,
}

/// One streamed fragment from the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamChunk {
    /// Incremental reply text; may be empty on metadata-only chunks.
    pub text: String,
    /// Grounding citations carried by this chunk.
    pub citations: Vec<Citation>,
}

/// Inline binary content returned by the image endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload as delivered by the provider.
    pub data: String,
}

/// The provider seam: streamed text generation plus one-shot images.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Stream a reply for `request`, delivering fragments to `on_chunk` in
    /// provider order.
    async fn stream_generate(
        &self,
        request: &GenerateRequest,
        on_chunk: &mut (dyn FnMut(StreamChunk) + Send),
    ) -> Result<(), BrainError>;

    /// Generate an image for `prompt`. Returns `None` when the response
    /// carries no inline-data part.
    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>, BrainError>;
}
