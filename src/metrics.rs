// src/metrics.rs
//! Prometheus recorder and the analysis counters.

use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const ANALYSES_TOTAL: &str = "analyses_total";
pub const ANALYSIS_REJECTED_TOTAL: &str = "analysis_rejected_total";
pub const ANALYSIS_TEXT_CHARS: &str = "analysis_text_chars";
pub const ANALYSIS_BIAS_ABS: &str = "analysis_bias_abs";

// One recorder per process; later `init` calls reuse it.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once) and describe the series.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!(ANALYSES_TOTAL, "Completed analyses, by analyzer variant");
    describe_counter!(ANALYSIS_REJECTED_TOTAL, "Rejected analyze requests, by reason");
    describe_histogram!(ANALYSIS_TEXT_CHARS, "Length of analysed texts in characters");
    describe_histogram!(ANALYSIS_BIAS_ABS, "Absolute bias score of completed analyses");
}

/// Record one completed analysis. No-op until a recorder is installed.
pub fn record_analysis(variant: &'static str, chars: usize, bias: f64) {
    counter!(ANALYSES_TOTAL, "variant" => variant).increment(1);
    histogram!(ANALYSIS_TEXT_CHARS).record(chars as f64);
    histogram!(ANALYSIS_BIAS_ABS).record(bias.abs());
}

pub fn record_rejection(reason: &'static str) {
    counter!(ANALYSIS_REJECTED_TOTAL, "reason" => reason).increment(1);
}
