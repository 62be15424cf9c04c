// src/api.rs
//! HTTP surface: health check and the analyze endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::analyze::{BiasEngine, EngineOptions};
use crate::config::AppConfig;
use crate::metrics::{record_analysis, record_rejection};
use crate::report::AnalyzeRequest;
use crate::telemetry::{anon_hash, dev_logging_enabled};

pub const ERR_NO_TEXT: &str = "No text provided";
pub const ERR_TOO_SHORT: &str = "Text is too short for meaningful analysis";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BiasEngine>,
    /// Minimum word count for `/api/analyze`; 0 disables the check.
    pub min_words: usize,
}

impl AppState {
    pub fn new(engine: BiasEngine, min_words: usize) -> Self {
        Self {
            engine: Arc::new(engine),
            min_words,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            BiasEngine::new(cfg.analyzer.engine_options()),
            cfg.server.min_words,
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BiasEngine::new(EngineOptions::default()), 0)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(reason: &'static str, msg: impl Into<String>) -> Response {
    record_rejection(reason);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody { error: msg.into() }),
    )
        .into_response()
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request("invalid_body", rej.body_text()),
    };
    let Some(text) = req.text else {
        return bad_request("missing_text", ERR_NO_TEXT);
    };
    if state.min_words > 0 && text.split_whitespace().count() < state.min_words {
        return bad_request("too_short", ERR_TOO_SHORT);
    }

    let result = state.engine.analyze(&text);
    record_analysis(
        state.engine.options().variant.as_str(),
        text.chars().count(),
        result.bias.base.score,
    );
    if dev_logging_enabled() {
        info!(
            target: "analyzer",
            id = %anon_hash(&text),
            bias = %result.bias.base.interpretation,
            "POST /api/analyze"
        );
    }
    Json(result).into_response()
}
