//! Client side of the external chat-completion service.
//!
//! Handlers depend on the [`ChatModel`] trait only, so the Ollama client can
//! be swapped for a fake in tests.

pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaClient;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request to inference service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference service returned no message")]
    EmptyResponse,
}

/// A single-message chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub prompt: String,
    /// Raw image bytes attached to the message.
    pub images: Vec<Vec<u8>>,
}

impl ChatRequest {
    pub fn text(model: &str, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            images: Vec::new(),
        }
    }

    pub fn with_image(model: &str, prompt: String, image: Vec<u8>) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            images: vec![image],
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the request and returns the assistant's text.
    async fn chat(&self, request: ChatRequest) -> Result<String, InferenceError>;
}
