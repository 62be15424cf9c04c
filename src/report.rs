//! Result structures returned by the engine and the HTTP API.
//!
//! The shape mirrors what the browser extension consumes: one block per
//! dimension (`bias`, `sentiment`, `objectivity`) plus a one-line summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyze::lexicon::{MoralFoundation, Topic};

/// Per-topic bias breakdown, ordered by `Topic` declaration order.
pub type TopicAnalysis = BTreeMap<Topic, TopicScore>;

/// Relative weight of each moral foundation.
pub type MoralFoundations = BTreeMap<MoralFoundation, f64>;

/// Incoming request body. `text` is optional so the transport can tell a
/// missing field from an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    /// Signed topic bias in <-1.0, 1.0>.
    pub score: f64,
    pub left_terms: usize,
    pub right_terms: usize,
}

impl TopicScore {
    /// Topics without any matched term are never shown.
    pub fn has_signal(&self) -> bool {
        self.left_terms + self.right_terms > 0
    }
}

/// Which search pass selected an evidence sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Matched the lexicon selected by the label's polarity.
    Direct,
    /// Matched a topic keyword list.
    Topic(Topic),
    /// Matched a generic framing word.
    Framing,
}

/// A literal sentence from the input quoted back as justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSentence {
    pub sentence: String,
    /// The lexicon term that made the sentence qualify.
    pub term: String,
    pub source: EvidenceSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub interpretation: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub evidence: Vec<EvidenceSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasResult {
    #[serde(flatten)]
    pub base: ScoreResult,
    /// Term-volume confidence in <0.0, 1.0> (improved analyzer only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub topic_analysis: TopicAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moral_foundations: Option<MoralFoundations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub bias: BiasResult,
    pub sentiment: ScoreResult,
    pub objectivity: ScoreResult,
    pub overall_assessment: String,
}

impl BiasResult {
    /// Topics worth displaying, in map order.
    pub fn displayed_topics(&self) -> impl Iterator<Item = (&Topic, &TopicScore)> {
        self.topic_analysis.iter().filter(|(_, t)| t.has_signal())
    }
}
