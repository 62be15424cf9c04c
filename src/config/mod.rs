// src/config/mod.rs
//! Service configuration loaded from `config/analyzer.toml`.
//!
//! Every section and field is optional; a missing file yields the defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyze::{AnalyzerVariant, ComposeOptions, EngineOptions};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_VARIANT: &str = "ANALYZER_VARIANT";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_true() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analyzer: AnalyzerConfig,
    pub server: ServerConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub variant: AnalyzerVariant,
    /// Attach the fixed prevalence notes to bias evidence.
    #[serde(default = "default_true")]
    pub prevalence_notes: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            variant: AnalyzerVariant::default(),
            prevalence_notes: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            variant: self.variant,
            compose: ComposeOptions {
                prevalence_notes: self.prevalence_notes,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Reject texts with fewer words; 0 disables the check.
    #[serde(default)]
    pub min_words: usize,
}

/// Ordered remote endpoints for the transport client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URLs of `POST /api/analyze`, tried in order.
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Run the in-process engine when every endpoint failed.
    #[serde(default = "default_true")]
    pub local_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            local_fallback: true,
        }
    }
}

impl AppConfig {
    /// Load from `ANALYZER_CONFIG_PATH` or `config/analyzer.toml`, then apply env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = Self::load_from_path(&path)?;

        if let Ok(raw) = std::env::var(ENV_VARIANT) {
            cfg.analyzer.variant = raw
                .parse()
                .with_context(|| format!("invalid {ENV_VARIANT}={raw}"))?;
        }
        Ok(cfg)
    }

    /// Missing file → defaults; unreadable or malformed file → error.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            warn!(target: "analyzer", path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read analyzer config at {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse analyzer config at {}", path.display()))?;
        info!(
            target: "analyzer",
            path = %path.display(),
            variant = %cfg.analyzer.variant,
            endpoints = cfg.client.endpoints.len(),
            "config loaded"
        );
        Ok(cfg)
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.analyzer.variant, AnalyzerVariant::Improved);
        assert!(cfg.analyzer.prevalence_notes);
        assert_eq!(cfg.server.min_words, 0);
        assert_eq!(cfg.client.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(cfg.client.local_fallback);
    }

    #[test]
    fn parses_all_sections() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [analyzer]
            variant = "plain"
            prevalence_notes = false

            [server]
            min_words = 10

            [client]
            endpoints = ["http://a/api/analyze", "http://b/api/analyze"]
            timeout_ms = 2500
            local_fallback = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.analyzer.variant, AnalyzerVariant::Plain);
        assert!(!cfg.analyzer.engine_options().compose.prevalence_notes);
        assert_eq!(cfg.server.min_words, 10);
        assert_eq!(cfg.client.endpoints.len(), 2);
        assert_eq!(cfg.client.timeout_ms, 2500);
        assert!(!cfg.client.local_fallback);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(AppConfig::from_toml_str("[analyzer]\nvariant = \"fancy\"").is_err());
    }

    #[test]
    #[serial]
    fn load_honours_path_and_variant_env() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[server]\nmin_words = 5").unwrap();

        std::env::set_var(ENV_CONFIG_PATH, f.path());
        std::env::set_var(ENV_VARIANT, "plain");
        let cfg = AppConfig::load().unwrap();
        std::env::remove_var(ENV_CONFIG_PATH);
        std::env::remove_var(ENV_VARIANT);

        assert_eq!(cfg.server.min_words, 5);
        assert_eq!(cfg.analyzer.variant, AnalyzerVariant::Plain);
    }

    #[test]
    #[serial]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(ENV_CONFIG_PATH, dir.path().join("nope.toml"));
        std::env::remove_var(ENV_VARIANT);
        let cfg = AppConfig::load().unwrap();
        std::env::remove_var(ENV_CONFIG_PATH);
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    #[serial]
    fn malformed_file_is_an_error_with_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[server\nmin_words = ").unwrap();
        let err = AppConfig::load_from_path(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse analyzer config"));
    }
}
