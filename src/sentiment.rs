//! Lexicon sentiment scorer.
//!
//! Valences come from `sentiment_lexicon.json` (integer weights, roughly -3..=3).
//! The raw sum is squashed into (-1, 1) with `x / sqrt(x² + 15)`, the same
//! normalisation VADER uses for its compound score.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::analyze::lexicon::{is_negator, NEGATION_WINDOW};

static LEXICON: Lazy<BTreeMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<BTreeMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Normalisation constant for the compound score.
const ALPHA: f64 = 15.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        LEXICON.get(w).copied().unwrap_or(0)
    }

    /// Valence of each sentiment-bearing token, in text order.
    /// A negator within the previous `NEGATION_WINDOW` tokens flips the word's sign.
    fn contributions(&self, text: &str) -> Vec<(String, i32)> {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut out = Vec::new();

        for (i, tok) in tokens.iter().enumerate() {
            let base = self.word_score(tok);
            if base == 0 {
                continue;
            }
            let negated =
                (1..=NEGATION_WINDOW).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            out.push((tok.clone(), if negated { -base } else { base }));
        }
        out
    }

    /// Raw valence sum after negation.
    pub fn raw_score(&self, text: &str) -> i32 {
        self.contributions(text).iter().map(|(_, v)| v).sum()
    }

    /// Compound score in [-1, 1]; 0 for text without sentiment words.
    pub fn score(&self, text: &str) -> f64 {
        let raw = self.raw_score(text);
        if raw == 0 {
            return 0.0;
        }
        let x = f64::from(raw);
        (x / (x * x + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }

    /// First whole word whose negation-adjusted valence is positive (or negative).
    pub fn first_charged_word(&self, text: &str, positive: bool) -> Option<String> {
        self.contributions(text)
            .into_iter()
            .find(|(_, v)| if positive { *v > 0 } else { *v < 0 })
            .map(|(w, _)| w)
    }
}

/// Lower-case word tokens; apostrophes stay inside a token so "isn't" survives.
pub(crate) fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_parses() {
        let a = SentimentAnalyzer::new();
        assert!(a.word_score("good") > 0);
        assert!(a.word_score("terrible") < 0);
        assert_eq!(a.word_score("committee"), 0);
    }

    #[test]
    fn neutral_and_empty_text_score_zero() {
        let a = SentimentAnalyzer::new();
        assert_eq!(a.score(""), 0.0);
        assert_eq!(a.score("   \n\t "), 0.0);
        assert_eq!(a.score("The committee met on Tuesday."), 0.0);
        assert_eq!(a.score("Председатель выступил с речью."), 0.0);
    }

    #[test]
    fn polarity_follows_valence() {
        let a = SentimentAnalyzer::new();
        assert!(a.score("A great and wonderful success.") > 0.5);
        assert!(a.score("A terrible, tragic disaster.") < -0.5);
    }

    #[test]
    fn negation_flips_sign() {
        let a = SentimentAnalyzer::new();
        let plain = a.raw_score("the plan is good");
        let negated = a.raw_score("the plan is not good");
        assert_eq!(plain, 2);
        assert_eq!(negated, -2);

        let far = a.raw_score("not that it matters at all, good");
        assert_eq!(far, 2, "negator outside the window must not flip");
    }

    #[test]
    fn compound_stays_in_range() {
        let a = SentimentAnalyzer::new();
        let long = "excellent ".repeat(500);
        let s = a.score(&long);
        assert!(s > 0.99 && s <= 1.0);
    }

    #[test]
    fn charged_words_match_whole_tokens() {
        let a = SentimentAnalyzer::new();
        let s = "The ruling was deeply unfair to workers";
        assert_eq!(a.first_charged_word(s, true), None);
        assert_eq!(a.first_charged_word(s, false).as_deref(), Some("unfair"));
        assert_eq!(
            a.first_charged_word("it was not good at all", false).as_deref(),
            Some("good")
        );
    }

    #[test]
    fn tokenizer_keeps_contractions() {
        let toks: Vec<String> = tokenize("It isn't 'fine', OK?").collect();
        assert_eq!(toks, vec!["it", "isn't", "fine", "ok"]);
    }
}
