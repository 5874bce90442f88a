//! API routes for carebotd

use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use carebot_common::templates::{EMPTY_INPUT, INTERNAL_ERROR};
use carebot_common::RoutingDecision;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

/// Chat request body. A missing message counts as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub mode: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

pub fn api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/get_response", post(get_response))
        .route("/health", get(health))
        .route("/v1/topics", get(topics))
        .route("/metrics", get(metrics))
}

fn internal_error() -> (StatusCode, Json<ChatResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatResponse {
            response: INTERNAL_ERROR.to_string(),
        }),
    )
}

async fn get_response(
    State(state): State<AppStateArc>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejected chat request: {}", rejection);
            return internal_error();
        }
    };

    let message = req.message.trim().to_string();
    if message.is_empty() {
        state
            .metrics
            .observe(&RoutingDecision::EmptyInput, Duration::ZERO);
        return (
            StatusCode::OK,
            Json(ChatResponse {
                response: EMPTY_INPUT.to_string(),
            }),
        );
    }

    // Run dispatch in its own task so a panic becomes a 500, not a dropped connection
    let task_state = Arc::clone(&state);
    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let decision = task_state.service.respond(&message).await;
        (decision, started.elapsed())
    });

    match handle.await {
        Ok((decision, elapsed)) => {
            state.metrics.observe(&decision, elapsed);
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: decision.render().to_string(),
                }),
            )
        }
        Err(e) => {
            error!("Dispatch task failed: {}", e);
            internal_error()
        }
    }
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        provider: state.service.provider().to_string(),
        mode: state.service.mode().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn topics(State(state): State<AppStateArc>) -> Json<TopicsResponse> {
    Json(TopicsResponse {
        topics: state
            .service
            .topics()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

async fn metrics(State(state): State<AppStateArc>) -> Response {
    match state.metrics.export() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!("Metrics export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
