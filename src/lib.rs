// src/lib.rs
// Public library surface for the service binary, the CLI and integration tests.

pub mod analyze;
pub mod api;
pub mod client;
pub mod config;
pub mod metrics;
pub mod report;
pub mod sentiment;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze, AnalyzerVariant, BiasEngine, EngineOptions};
pub use crate::api::{create_router, AppState};
pub use crate::client::{AnalyzerClient, ClientOutcome, EndpointError};
pub use crate::config::AppConfig;
pub use crate::report::{AnalysisResult, AnalyzeRequest};

use anyhow::Context;
use axum::Router;
use tracing::info;

/// Build the full service router from `config/analyzer.toml` (or `ANALYZER_CONFIG_PATH`),
/// with `/metrics` merged in.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = AppConfig::load().context("load analyzer config")?;
    app_with_config(&cfg)
}

pub fn app_with_config(cfg: &AppConfig) -> anyhow::Result<Router> {
    let metrics = metrics::Metrics::init()?;
    let state = AppState::from_config(cfg);
    info!(
        target: "analyzer",
        variant = %cfg.analyzer.variant,
        min_words = cfg.server.min_words,
        "router ready"
    );
    Ok(create_router(state).merge(metrics.router()))
}
