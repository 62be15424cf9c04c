//! Raw scores computed from lexicon matches.
//!
//! - `bias`        : (right - left) / (right + left), 0 without matches; the
//!   improved variant also counts framing-pattern matches on each side
//! - `sentiment`   : compound lexicon valence, see `crate::sentiment`
//! - `objectivity` : objective vs subjective marker balance, pulled toward
//!   `NEUTRAL_OBJECTIVITY` by a small prior so sparse text stays near the middle
//! - `topics`      : the bias ratio restricted to each topic's vocabulary
//! - `moral`       : share of moral-foundation keyword hits (improved variant)

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{
    count_frames, count_terms, global_terms, MoralFoundation, Side, Topic, OBJECTIVE_MARKERS,
    SUBJECTIVE_MARKERS,
};
use crate::report::{MoralFoundations, TopicAnalysis, TopicScore};
use crate::sentiment::SentimentAnalyzer;

/// Objectivity of text without any marker: midpoint of the Balanced band.
pub const NEUTRAL_OBJECTIVITY: f64 = 0.6;

/// Pseudo-count of the neutral prior in the objectivity ratio.
const OBJECTIVITY_PRIOR: f64 = 2.0;

/// Below this many trimmed chars the signal confidence is pinned low.
pub const SHORT_TEXT_CHARS: usize = 50;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("word regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    pub bias: f64,
    pub left_terms: usize,
    pub right_terms: usize,
    pub topics: TopicAnalysis,
    pub sentiment: f64,
    pub objectivity: f64,
    /// `None` when the plain variant skips moral foundations.
    pub moral: Option<MoralFoundations>,
    /// Term-volume confidence, `None` for the plain variant.
    pub confidence: Option<f64>,
}

impl Scores {
    /// Scores for text with nothing to analyse.
    pub fn neutral(improved: bool) -> Self {
        Self {
            bias: 0.0,
            left_terms: 0,
            right_terms: 0,
            topics: TopicAnalysis::new(),
            sentiment: 0.0,
            objectivity: NEUTRAL_OBJECTIVITY,
            moral: improved.then(MoralFoundations::new),
            confidence: improved.then_some(signal_confidence(0, 0)),
        }
    }
}

/// Compute every raw score for `text`.
///
/// `improved` selects the improved variant (framing patterns, moral foundations, confidence).
pub fn score_text(text: &str, improved: bool) -> Scores {
    if text.trim().is_empty() {
        return Scores::neutral(improved);
    }

    let lower = text.to_lowercase();
    let mut left = count_terms(&lower, global_terms(Side::Left));
    let mut right = count_terms(&lower, global_terms(Side::Right));
    if improved {
        left += count_frames(&lower, Side::Left);
        right += count_frames(&lower, Side::Right);
    }

    let trimmed_chars = text.trim().chars().count();
    Scores {
        bias: ratio(left, right),
        left_terms: left,
        right_terms: right,
        topics: topic_scores(&lower),
        sentiment: SentimentAnalyzer::new().score(text),
        objectivity: objectivity(&lower),
        moral: improved.then(|| moral_foundations(&lower)),
        confidence: improved.then(|| signal_confidence(left + right, trimmed_chars)),
    }
}

/// Signed left/right balance in [-1, 1]; 0 when nothing matched.
pub fn ratio(left: usize, right: usize) -> f64 {
    let total = left + right;
    if total == 0 {
        return 0.0;
    }
    ((right as f64 - left as f64) / total as f64).clamp(-1.0, 1.0)
}

/// Per-topic bias; topics without any matched term are left out.
pub fn topic_scores(lower: &str) -> TopicAnalysis {
    let mut out = TopicAnalysis::new();
    for topic in Topic::ALL {
        let left = count_terms(lower, topic.left_terms());
        let right = count_terms(lower, topic.right_terms());
        if left + right == 0 {
            continue;
        }
        out.insert(
            topic,
            TopicScore {
                score: ratio(left, right),
                left_terms: left,
                right_terms: right,
            },
        );
    }
    out
}

/// 1.0 = factual, 0.0 = opinion. Numbers count as objective markers.
pub fn objectivity(lower: &str) -> f64 {
    let numeric = WORD_RE
        .find_iter(lower)
        .filter(|m| m.as_str().chars().any(|c| c.is_ascii_digit()))
        .count();
    let objective = (count_terms(lower, OBJECTIVE_MARKERS) + numeric) as f64;
    let subjective = count_terms(lower, SUBJECTIVE_MARKERS) as f64;

    let score = (objective + OBJECTIVITY_PRIOR * NEUTRAL_OBJECTIVITY)
        / (objective + subjective + OBJECTIVITY_PRIOR);
    score.clamp(0.0, 1.0)
}

/// Normalised keyword share per foundation. Empty when no keyword matched.
pub fn moral_foundations(lower: &str) -> MoralFoundations {
    let mut counts = [0usize; MoralFoundation::ALL.len()];
    for m in WORD_RE.find_iter(lower) {
        let token = m.as_str();
        for (i, f) in MoralFoundation::ALL.iter().enumerate() {
            if f.matches(token) {
                counts[i] += 1;
            }
        }
    }

    let total: usize = counts.iter().sum();
    let mut out = MoralFoundations::new();
    if total == 0 {
        return out;
    }
    for (f, n) in MoralFoundation::ALL.iter().zip(counts) {
        out.insert(*f, n as f64 / total as f64);
    }
    out
}

/// More matched terms → more confidence, capped at 0.9; very short text → 0.1.
pub fn signal_confidence(total_terms: usize, trimmed_chars: usize) -> f64 {
    if trimmed_chars < SHORT_TEXT_CHARS {
        return 0.1;
    }
    (total_terms as f64 / 20.0).clamp(0.3, 0.9)
}
