// src/analyze/mod.rs
//! Analysis pipeline entry: scores, labels, evidence and explanations.
//!
//! Order:
//! 1) raw scores (`scoring`)
//! 2) labels from fixed bands (`interpret`)
//! 3) quoted sentences (`evidence`)
//! 4) paragraphs and the overall assessment (`explain`)

pub mod evidence;
pub mod explain;
pub mod interpret;
pub mod lexicon;
pub mod scoring;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::report::{AnalysisResult, AnalyzeRequest, BiasResult, ScoreResult};
use crate::telemetry::{anon_hash, dev_logging_enabled};

pub use crate::analyze::explain::{fill_missing_explanations, ComposeOptions};
pub use crate::analyze::interpret::{BiasLabel, ObjectivityLabel, SentimentLabel, Strength};
pub use crate::analyze::lexicon::{MoralFoundation, Side, Topic};
pub use crate::analyze::scoring::{score_text, Scores};

/// Which analyzer flavour runs.
///
/// `Improved` counts framing patterns and adds moral foundations and the signal
/// confidence to the bias block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerVariant {
    Plain,
    #[default]
    Improved,
}

impl AnalyzerVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerVariant::Plain => "plain",
            AnalyzerVariant::Improved => "improved",
        }
    }
}

impl fmt::Display for AnalyzerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "basic" => Ok(AnalyzerVariant::Plain),
            "improved" => Ok(AnalyzerVariant::Improved),
            other => anyhow::bail!("unknown analyzer variant `{other}`"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub variant: AnalyzerVariant,
    pub compose: ComposeOptions,
}

/// Stateless analysis engine. Cheap to clone; share it behind an `Arc` in server state.
#[derive(Debug, Clone, Default)]
pub struct BiasEngine {
    opts: EngineOptions,
}

impl BiasEngine {
    pub fn new(opts: EngineOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.opts
    }

    /// Analyze one article. Never fails: any string yields a well-formed result.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let improved = self.opts.variant == AnalyzerVariant::Improved;
        let scores = score_text(text, improved);

        let bias_label = BiasLabel::from_score(scores.bias);
        let sentiment_label = SentimentLabel::from_score(scores.sentiment);
        let objectivity_label = ObjectivityLabel::from_score(scores.objectivity);

        let mut result = AnalysisResult {
            bias: BiasResult {
                base: ScoreResult {
                    score: scores.bias,
                    interpretation: bias_label.to_string(),
                    explanation: String::new(),
                    evidence: Vec::new(),
                },
                confidence: scores.confidence,
                topic_analysis: scores.topics,
                moral_foundations: scores.moral,
            },
            sentiment: ScoreResult {
                score: scores.sentiment,
                interpretation: sentiment_label.to_string(),
                explanation: String::new(),
                evidence: Vec::new(),
            },
            objectivity: ScoreResult {
                score: scores.objectivity,
                interpretation: objectivity_label.to_string(),
                explanation: String::new(),
                evidence: Vec::new(),
            },
            overall_assessment: String::new(),
        };
        fill_missing_explanations(&mut result, text, &self.opts.compose);

        if dev_logging_enabled() {
            // Never log raw text.
            debug!(
                target: "analyzer",
                id = %anon_hash(text),
                variant = %self.opts.variant,
                bias = result.bias.base.score,
                sentiment = result.sentiment.score,
                objectivity = result.objectivity.score,
                left_terms = scores.left_terms,
                right_terms = scores.right_terms,
                "analysis complete"
            );
        }
        result
    }

    /// Missing `text` is analysed as empty text.
    pub fn analyze_request(&self, req: &AnalyzeRequest) -> AnalysisResult {
        self.analyze(req.text.as_deref().unwrap_or_default())
    }
}

/// Analyze with the default (improved) engine.
pub fn analyze(text: &str) -> AnalysisResult {
    BiasEngine::default().analyze(text)
}
