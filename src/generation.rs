// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Upstream generation service client.
//
// The service is an opaque streaming text generator: it consumes a
// persona system prompt plus the conversation history and yields a token
// stream. Everything behind the `GenerationClient` trait is replaceable —
// handlers never touch a concrete HTTP client.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::Stream;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;

// ---------------------------------------------------------------------------
// Conversation types
// ---------------------------------------------------------------------------

/// The role of a chat message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in the debate conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A fully-assembled request for one debate turn.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Persona system prompt, sent as the leading system message.
    pub system_prompt: String,
    /// Conversation history from the client, in order.
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Build a request from the upstream config, a persona prompt, and the
    /// client-supplied history.
    pub fn new(
        upstream: &UpstreamConfig,
        system_prompt: &str,
        messages: Vec<ChatMessage>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.to_string(),
            messages,
            model: upstream.model.clone(),
            temperature: upstream.temperature,
            max_tokens: upstream.max_tokens,
        }
    }
}

/// The streamed token body from the generation service.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<Bytes, GenerationError>> + Send>>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation request timed out: {0}")]
    Timeout(String),

    #[error("generation service returned status {status}")]
    UpstreamStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Trait: GenerationClient (dependency injection point)
// ---------------------------------------------------------------------------

/// Abstraction over the streaming generation service.
///
/// Implementations must be Send + Sync so they can be shared across
/// request handlers via `Arc`.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn stream(&self, request: GenerationRequest) -> Result<TokenStream, GenerationError>;
}

// ---------------------------------------------------------------------------
// Reqwest implementation
// ---------------------------------------------------------------------------

/// Production client speaking the OpenAI-compatible chat completions API.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: Option<u64>,
}

impl HttpGenerationClient {
    pub fn new(client: reqwest::Client, upstream: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: upstream.base_url.clone(),
            timeout_ms: upstream.timeout_ms,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

/// Wire payload for the chat completions call.
#[derive(Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn stream(&self, request: GenerationRequest) -> Result<TokenStream, GenerationError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage {
            role: ChatRole::System,
            content: request.system_prompt.clone(),
        });
        messages.extend(request.messages.iter().cloned());

        let body = CompletionsBody {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: true,
        };

        let mut req = self.client.post(self.completions_url()).json(&body);
        if let Some(timeout_ms) = self.timeout_ms {
            req = req.timeout(std::time::Duration::from_millis(timeout_ms));
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(e.to_string())
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let stream = resp
            .bytes_stream()
            .map_err(|e| GenerationError::Transport(e.to_string()));
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            model: "test-model".to_string(),
            temperature: 0.9,
            max_tokens: 150,
            timeout_ms: Some(2_000),
        }
    }

    fn request(cfg: &UpstreamConfig) -> GenerationRequest {
        GenerationRequest::new(
            cfg,
            "You are a debate persona.",
            vec![ChatMessage {
                role: ChatRole::User,
                content: "Topic: Should India implement a Uniform Civil Code?.".to_string(),
            }],
        )
    }

    async fn collect(mut stream: TokenStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn generation_request_carries_upstream_settings() {
        let cfg = upstream("http://localhost:1");
        let req = request(&cfg);
        assert_eq!(req.model, "test-model");
        assert_eq!(req.temperature, 0.9);
        assert_eq!(req.max_tokens, 150);
    }

    #[tokio::test]
    async fn streams_upstream_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "stream": true,
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("data: hello\n\n", "text/event-stream"),
            )
            .mount(&server)
            .await;

        let cfg = upstream(&server.uri());
        let client = HttpGenerationClient::new(reqwest::Client::new(), &cfg);
        let stream = client.stream(request(&cfg)).await.unwrap();
        let body = collect(stream).await;
        assert_eq!(body, b"data: hello\n\n");
    }

    #[tokio::test]
    async fn system_prompt_is_first_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are a debate persona."},
                    {"role": "user", "content": "Topic: Should India implement a Uniform Civil Code?."}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw("ok", "text/plain"))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = upstream(&server.uri());
        let client = HttpGenerationClient::new(reqwest::Client::new(), &cfg);
        client.stream(request(&cfg)).await.unwrap();
    }

    #[tokio::test]
    async fn upstream_error_status_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let cfg = upstream(&server.uri());
        let client = HttpGenerationClient::new(reqwest::Client::new(), &cfg);
        let err = client.stream(request(&cfg)).await.err().unwrap();
        match err {
            GenerationError::UpstreamStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Nothing listens on this port.
        let cfg = upstream("http://127.0.0.1:9");
        let client = HttpGenerationClient::new(reqwest::Client::new(), &cfg);
        let err = client.stream(request(&cfg)).await.err().unwrap();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}
