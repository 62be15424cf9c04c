//! News Bias Analyzer: binary entrypoint.
//! Boots the Axum HTTP server with the analyze route, CORS and `/metrics`.
//!
//! See `README.md` for quickstart and `config/analyzer.toml` for settings.

use shuttle_axum::ShuttleAxum;

use news_bias_analyzer::telemetry::init_tracing;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // Picks up ANALYZER_CONFIG_PATH / ANALYZER_VARIANT / ANALYZER_DEV_LOG.
    let _ = dotenvy::dotenv();

    init_tracing();

    let router = news_bias_analyzer::app().await?;
    Ok(router.into())
}
