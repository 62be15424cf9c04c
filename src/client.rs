// src/client.rs
//! Transport client: ordered analyzer endpoints with local fallback.
//!
//! Backends are tried in order until one answers. Remote responses that lack
//! explanations are completed locally with the shared composer, so callers
//! always get displayable text.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::analyze::{fill_missing_explanations, BiasEngine, ComposeOptions, EngineOptions};
use crate::config::ClientConfig;
use crate::report::{AnalysisResult, AnalyzeRequest};

pub const LOCAL_BACKEND: &str = "local";

/// Why a single endpoint produced no result.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} is unavailable: {reason}")]
    Unavailable { endpoint: String, reason: String },
}

impl EndpointError {
    pub fn endpoint(&self) -> &str {
        match self {
            EndpointError::Transport { endpoint, .. }
            | EndpointError::Status { endpoint, .. }
            | EndpointError::Decode { endpoint, .. }
            | EndpointError::Unavailable { endpoint, .. } => endpoint,
        }
    }
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, EndpointError>;
    /// Endpoint URL or backend label, used in outcomes and logs.
    fn name(&self) -> &str;
}

pub type DynBackend = Arc<dyn AnalysisBackend>;

/// Remote `POST /api/analyze` endpoint.
#[derive(Clone)]
pub struct HttpBackend {
    endpoint: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-bias-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, EndpointError> {
        let body = AnalyzeRequest {
            text: Some(text.to_string()),
        };
        let rsp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|source| EndpointError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(EndpointError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }
        rsp.json::<AnalysisResult>()
            .await
            .map_err(|source| EndpointError::Decode {
                endpoint: self.endpoint.clone(),
                source,
            })
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

/// In-process engine; never fails.
#[derive(Clone, Default)]
pub struct LocalBackend {
    engine: BiasEngine,
}

impl LocalBackend {
    pub fn new(opts: EngineOptions) -> Self {
        Self {
            engine: BiasEngine::new(opts),
        }
    }
}

#[async_trait]
impl AnalysisBackend for LocalBackend {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, EndpointError> {
        Ok(self.engine.analyze(text))
    }

    fn name(&self) -> &str {
        LOCAL_BACKEND
    }
}

/// What the client ended up with.
#[derive(Debug)]
pub enum ClientOutcome {
    /// The first backend answered.
    Primary(AnalysisResult),
    /// A later backend answered after the listed failures.
    Fallback {
        endpoint: String,
        failures: Vec<EndpointError>,
        result: AnalysisResult,
    },
    /// Every backend failed.
    Failed(Vec<EndpointError>),
}

impl ClientOutcome {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ClientOutcome::Primary(r) | ClientOutcome::Fallback { result: r, .. } => Some(r),
            ClientOutcome::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> anyhow::Result<AnalysisResult> {
        match self {
            ClientOutcome::Primary(r) | ClientOutcome::Fallback { result: r, .. } => Ok(r),
            ClientOutcome::Failed(failures) => {
                let detail = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                anyhow::bail!("all analyzer endpoints failed: {detail}")
            }
        }
    }
}

pub struct AnalyzerClient {
    backends: Vec<DynBackend>,
    compose: ComposeOptions,
}

impl AnalyzerClient {
    pub fn new(backends: Vec<DynBackend>) -> Self {
        Self {
            backends,
            compose: ComposeOptions::default(),
        }
    }

    pub fn with_compose_options(mut self, compose: ComposeOptions) -> Self {
        self.compose = compose;
        self
    }

    /// Remote endpoints in config order, then the local engine when enabled.
    pub fn from_config(cfg: &ClientConfig, engine: EngineOptions) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(cfg.timeout_ms);
        let mut backends: Vec<DynBackend> = Vec::with_capacity(cfg.endpoints.len() + 1);
        for ep in &cfg.endpoints {
            let backend = HttpBackend::new(ep.clone(), timeout)
                .with_context(|| format!("analyzer endpoint {ep}"))?;
            backends.push(Arc::new(backend));
        }
        if cfg.local_fallback {
            backends.push(Arc::new(LocalBackend::new(engine)));
        }
        Ok(Self::new(backends).with_compose_options(engine.compose))
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub async fn analyze(&self, text: &str) -> ClientOutcome {
        let mut failures = Vec::new();
        for (idx, backend) in self.backends.iter().enumerate() {
            match backend.analyze(text).await {
                Ok(mut result) => {
                    fill_missing_explanations(&mut result, text, &self.compose);
                    if idx == 0 {
                        return ClientOutcome::Primary(result);
                    }
                    info!(
                        target: "analyzer",
                        endpoint = backend.name(),
                        failed = failures.len(),
                        "analysis served by fallback backend"
                    );
                    return ClientOutcome::Fallback {
                        endpoint: backend.name().to_string(),
                        failures,
                        result,
                    };
                }
                Err(e) => {
                    warn!(target: "analyzer", error = %e, "analyzer backend failed");
                    failures.push(e);
                }
            }
        }
        ClientOutcome::Failed(failures)
    }
}
