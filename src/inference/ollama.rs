use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatModel, ChatRequest, InferenceError};

/// Non-streaming client for Ollama's `/api/chat` endpoint.
pub struct OllamaClient {
    http: Client,
    base: String,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<OutMessage>,
}

#[derive(Deserialize)]
struct OutMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: host.trim_end_matches('/').to_string(),
        })
    }

    fn body<'a>(request: &'a ChatRequest) -> ChatBody<'a> {
        ChatBody {
            model: &request.model,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
                images: request.images.iter().map(|img| STANDARD.encode(img)).collect(),
            }],
            stream: false,
        }
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, request: ChatRequest) -> Result<String, InferenceError> {
        let url = format!("{}/api/chat", self.base);
        log::debug!(
            "Sending chat request to {} (model={}, prompt_len={}, images={})",
            url,
            request.model,
            request.prompt.len(),
            request.images.len()
        );

        let resp = self.http.post(&url).json(&Self::body(&request)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: ChatResponse = resp.json().await?;
        data.message
            .map(|m| m.content)
            .ok_or(InferenceError::EmptyResponse)
    }
}
