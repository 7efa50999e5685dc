// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// HTTP boundary.
//
// Responsibilities:
// - POST /validate-topic: sanitize + validate + rate limit a topic
// - POST /chat: persona lookup, embedded-topic safety check, then stream
//   the generation response through untouched
// - Heartbeat endpoint
//
// The safety pipeline and the generation client are injected — handlers
// never construct their own dependencies.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures_util::TryStreamExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::UpstreamConfig;
use crate::generation::{ChatMessage, ChatRole, GenerationClient, GenerationError, GenerationRequest};
use crate::personas::persona_for;
use crate::pipeline::SafetyPipeline;
use crate::verdict::Category;

/// Maximum request body size. Topics and debate histories are small.
const MAX_BODY_BYTES: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Request-boundary errors. Everything a handler can fail with maps onto
/// one of these; the taxonomy (and the status codes below) is part of the
/// wire contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Generation(GenerationError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "generation request timed out".to_string(),
            ),
            ApiError::Generation(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::Internal(detail) => {
                // Details stay server-side; the wire message is generic.
                tracing::error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state injected into axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SafetyPipeline>,
    pub generator: Arc<dyn GenerationClient>,
    pub upstream: UpstreamConfig,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateTopicResponse {
    is_valid: bool,
    sanitized_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRequestBody {
    messages: Vec<ChatMessage>,
    agent: String,
}

// ---------------------------------------------------------------------------
// Topic marker extraction
// ---------------------------------------------------------------------------

/// The client embeds the debate topic in its opening message as
/// `Topic: <text>.` — capture up to the first period or end of input.
fn topic_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)topic:\s*(.+?)(?:\.|$)").expect("static marker regex"))
}

/// Extract the embedded topic from a message body, if present.
pub fn extract_topic(content: &str) -> Option<String> {
    topic_marker()
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Heartbeat endpoint: GET /heartbeat -> 200 OK
pub async fn heartbeat() -> StatusCode {
    StatusCode::OK
}

async fn read_body(request: Request<Body>) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::InvalidInput(format!("failed to read request body: {e}")))
}

/// POST /validate-topic
///
/// Always 200 for a parseable request: the verdict rides in the body as
/// `isValid` so the client can show the reason inline. 400 only when
/// `topic` is missing or not a string.
pub async fn validate_topic(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    let started = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let body = read_body(request).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("request body is not valid JSON: {e}")))?;

    let topic = json
        .get("topic")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ApiError::InvalidInput("Topic is required and must be a string".to_string())
        })?;
    let user_id = json.get("userId").and_then(|v| v.as_str());

    let checked = state.pipeline.check(topic, user_id);
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        request_id = %request_id,
        is_valid = checked.verdict.is_safe,
        category = ?checked.verdict.category,
        latency_ms,
        "topic validated"
    );

    let response = if checked.verdict.is_safe {
        ValidateTopicResponse {
            is_valid: true,
            sanitized_topic: checked.sanitized_topic,
            reason: None,
            category: None,
            message: Some("Topic is safe and appropriate for debate".to_string()),
        }
    } else {
        ValidateTopicResponse {
            is_valid: false,
            sanitized_topic: checked.sanitized_topic,
            reason: checked.verdict.reason,
            category: checked.verdict.category,
            message: None,
        }
    };

    Ok(Json(response).into_response())
}

/// POST /chat
///
/// Looks up the persona, safety-checks any embedded `Topic:` marker in
/// the latest user message, and streams the generation response through.
pub async fn chat(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let body = read_body(request).await?;
    let chat_req: ChatRequestBody = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("request body is not valid JSON: {e}")))?;

    let persona = match persona_for(&chat_req.agent) {
        Some(p) => p,
        None => {
            tracing::info!(request_id = %request_id, agent = %chat_req.agent, "unknown agent");
            return Ok((StatusCode::BAD_REQUEST, "Invalid agent").into_response());
        }
    };

    // Safety check the latest user message if it carries a topic marker.
    // The chat path never consumes rate-limit quota.
    let last_user_content = chat_req
        .messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str());

    if let Some(topic) = last_user_content.and_then(extract_topic) {
        let checked = state.pipeline.check(&topic, None);
        if !checked.verdict.is_safe {
            tracing::info!(
                request_id = %request_id,
                agent = persona.key,
                category = ?checked.verdict.category,
                "embedded topic rejected"
            );
            let body = serde_json::json!({
                "error": "Topic validation failed",
                "reason": checked.verdict.reason,
                "category": checked.verdict.category,
            });
            return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
        }
    }

    let gen_req = GenerationRequest::new(&state.upstream, persona.system_prompt, chat_req.messages);
    let stream = state.generator.stream(gen_req).await?;

    tracing::info!(request_id = %request_id, agent = persona.key, "streaming debate turn");

    let body = Body::from_stream(
        stream.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string())),
    );
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// ---------------------------------------------------------------------------
// Router construction
// ---------------------------------------------------------------------------

/// Build the axum router. The pipeline and generation client are
/// injected — no side effects, no hard-coded clients.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/validate-topic", post(validate_topic))
        .route("/chat", post(chat))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
