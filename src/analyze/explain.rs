//! Natural-language explanations and the overall assessment.
//!
//! Composition only fills blanks: an explanation already present on a result
//! (for example one produced by a remote analyzer) is kept verbatim.

use std::fmt::Write as _;

use super::evidence::{bias_evidence, objectivity_evidence, sentiment_evidence, term_side};
use super::interpret::{
    confidence_percent, lean_percent, BiasLabel, ObjectivityLabel, SentimentLabel, Strength,
};
use super::lexicon::{MoralFoundation, Side};
use crate::report::{AnalysisResult, BiasResult, EvidenceSentence, EvidenceSource, ScoreResult};

// Prevalence notes are fixed flavour text attached to bias evidence. They are
// not measured from any corpus; `ComposeOptions::prevalence_notes` turns them off.
pub const LEFT_PREVALENCE: &str =
    "a phrase used roughly three times as often by left-leaning outlets as by right-leaning ones";
pub const RIGHT_PREVALENCE: &str =
    "a phrase used roughly three times as often by right-leaning outlets as by left-leaning ones";
pub const TOPIC_PREVALENCE: &str =
    "vocabulary that appears in about 70% of partisan coverage of the topic";
pub const FRAMING_PREVALENCE: &str =
    "framing language roughly twice as common in opinion writing as in straight news";

pub const EVIDENCE_HEADER: &str = "Key evidence:";
pub const TOPIC_HEADER: &str = "Topic breakdown:";

pub const INSUFFICIENT_BIAS: &str = "There is not enough text to assess political bias.";
pub const INSUFFICIENT_SENTIMENT: &str = "There is not enough text to assess sentiment.";
pub const INSUFFICIENT_OBJECTIVITY: &str = "There is not enough text to assess objectivity.";

pub const LOW_CONFIDENCE_NOTE: &str =
    "Few politically coded terms were found, so treat this reading with caution.";

/// Weight a moral foundation needs before it is called out.
pub const DOMINANT_FOUNDATION_MIN: f64 = 0.3;
/// Signal confidence below this adds the low-confidence note.
pub const LOW_SIGNAL_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    pub prevalence_notes: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            prevalence_notes: true,
        }
    }
}

/// Fill every empty explanation (and an empty overall assessment) on `result`.
///
/// Evidence missing from a dimension whose explanation is regenerated is
/// re-extracted from `text`, so a bare remote response ends up with the same
/// quotes the local engine would produce.
pub fn fill_missing_explanations(result: &mut AnalysisResult, text: &str, opts: &ComposeOptions) {
    let insufficient = text.trim().is_empty();

    if result.bias.base.explanation.trim().is_empty() {
        if result.bias.base.evidence.is_empty() && !insufficient {
            let label = BiasLabel::from_score(result.bias.base.score);
            result.bias.base.evidence =
                bias_evidence(text, label, Some(&result.bias.topic_analysis));
        }
        result.bias.base.explanation = if insufficient {
            INSUFFICIENT_BIAS.to_string()
        } else {
            explain_bias(&result.bias, opts)
        };
    }

    if result.sentiment.explanation.trim().is_empty() {
        if result.sentiment.evidence.is_empty() && !insufficient {
            let label = SentimentLabel::from_score(result.sentiment.score);
            result.sentiment.evidence = sentiment_evidence(text, label);
        }
        result.sentiment.explanation = if insufficient {
            INSUFFICIENT_SENTIMENT.to_string()
        } else {
            explain_sentiment(&result.sentiment)
        };
    }

    if result.objectivity.explanation.trim().is_empty() {
        if result.objectivity.evidence.is_empty() && !insufficient {
            result.objectivity.evidence = objectivity_evidence(text, result.objectivity.score);
        }
        result.objectivity.explanation = if insufficient {
            INSUFFICIENT_OBJECTIVITY.to_string()
        } else {
            explain_objectivity(&result.objectivity)
        };
    }

    if result.overall_assessment.trim().is_empty() {
        result.overall_assessment = overall_assessment(
            &result.bias.base.interpretation,
            &result.sentiment.interpretation,
            &result.objectivity.interpretation,
        );
    }
}

/// One-sentence summary built from the three labels.
pub fn overall_assessment(bias: &str, sentiment: &str, objectivity: &str) -> String {
    format!(
        "This article appears to be {}, with a {} tone. It is {} in its presentation.",
        bias.to_lowercase(),
        sentiment.to_lowercase(),
        objectivity.to_lowercase()
    )
}

fn direction(score: f64) -> &'static str {
    if score < 0.0 {
        "left"
    } else {
        "right"
    }
}

fn bias_headline(score: f64) -> String {
    let dir = direction(score);
    match Strength::from_score(score) {
        Strength::Minimal => "The article's politically coded language is sparse or evenly \
                              balanced, so it shows no meaningful political lean."
            .to_string(),
        Strength::Slight => format!(
            "The article leans slightly toward the {dir} in its choice of politically coded language."
        ),
        Strength::Moderate => format!(
            "The article leans moderately toward the {dir}, with coded terms from one side clearly outnumbering the other."
        ),
        Strength::Strong => format!(
            "The article leans strongly toward the {dir}; its politically coded language consistently favours one side."
        ),
        Strength::Extreme => format!(
            "The article leans overwhelmingly toward the {dir}; nearly all of its politically coded vocabulary comes from one side of the spectrum."
        ),
    }
}

fn bias_percentage(score: f64) -> String {
    if score == 0.0 {
        return "Left- and right-coded terms are in balance, placing the article at a 0% lean."
            .to_string();
    }
    format!(
        "On balance, the article's politically coded terms place it {}% toward the {} end of the spectrum.",
        lean_percent(score),
        direction(score)
    )
}

fn bias_rationale(ev: &EvidenceSentence, opts: &ComposeOptions) -> String {
    let context = match ev.source {
        EvidenceSource::Topic(topic) => format!(
            " in the context of {} issues",
            topic.as_str().replace('_', " ")
        ),
        _ => String::new(),
    };
    if !opts.prevalence_notes {
        return format!("This passage uses \"{}\"{}.", ev.term, context);
    }
    let note = match ev.source {
        EvidenceSource::Direct => match term_side(&ev.term) {
            Some(Side::Left) => LEFT_PREVALENCE,
            _ => RIGHT_PREVALENCE,
        },
        EvidenceSource::Topic(_) => TOPIC_PREVALENCE,
        EvidenceSource::Framing => FRAMING_PREVALENCE,
    };
    format!("This passage uses \"{}\"{}, {}.", ev.term, context, note)
}

/// Quotations block; `None` when there is nothing to quote.
fn evidence_block(
    evidence: &[EvidenceSentence],
    rationale: impl Fn(&EvidenceSentence) -> String,
) -> Option<String> {
    if evidence.is_empty() {
        return None;
    }
    let mut out = String::from(EVIDENCE_HEADER);
    for ev in evidence {
        let _ = write!(out, "\n\"{}\"\n{}", ev.sentence, rationale(ev));
    }
    Some(out)
}

fn topic_block(bias: &BiasResult) -> Option<String> {
    let mut lines = Vec::new();
    for (topic, ts) in bias.displayed_topics() {
        let leaning = if ts.score > 0.0 {
            "leans right"
        } else if ts.score < 0.0 {
            "leans left"
        } else {
            "is evenly balanced"
        };
        lines.push(format!(
            "- {} {} ({} left-coded vs {} right-coded terms).",
            topic.phrase(),
            leaning,
            ts.left_terms,
            ts.right_terms
        ));
    }
    if lines.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", TOPIC_HEADER, lines.join("\n")))
}

/// Dominant foundation above `DOMINANT_FOUNDATION_MIN`; ties go to declaration order.
pub fn dominant_foundation(bias: &BiasResult) -> Option<MoralFoundation> {
    let moral = bias.moral_foundations.as_ref()?;
    let mut best: Option<(MoralFoundation, f64)> = None;
    for (f, w) in moral {
        if best.map_or(true, |(_, b)| *w > b) {
            best = Some((*f, *w));
        }
    }
    best.filter(|(_, w)| *w > DOMINANT_FOUNDATION_MIN)
        .map(|(f, _)| f)
}

/// Full bias explanation, paragraphs separated by a blank line.
pub fn explain_bias(bias: &BiasResult, opts: &ComposeOptions) -> String {
    let score = bias.base.score;
    let mut paragraphs = vec![bias_headline(score), bias_percentage(score)];

    if let Some(block) = evidence_block(&bias.base.evidence, |ev| bias_rationale(ev, opts)) {
        paragraphs.push(block);
    }
    if let Some(block) = topic_block(bias) {
        paragraphs.push(block);
    }
    if let Some(f) = dominant_foundation(bias) {
        paragraphs.push(format!("The content emphasizes the moral foundation of {f}."));
    }
    if bias.confidence.is_some_and(|c| c < LOW_SIGNAL_CONFIDENCE) {
        paragraphs.push(LOW_CONFIDENCE_NOTE.to_string());
    }
    paragraphs.push(format!("Confidence in this assessment: {}%.", confidence_percent(score)));

    paragraphs.join("\n\n")
}

pub fn explain_sentiment(sentiment: &ScoreResult) -> String {
    let score = sentiment.score;
    let polarity = if score > 0.0 { "positive" } else { "negative" };
    let headline = match (SentimentLabel::from_score(score), Strength::from_score(score)) {
        (SentimentLabel::Neutral, _) | (_, Strength::Minimal) => {
            "The article's tone is largely neutral, with little emotionally charged language."
                .to_string()
        }
        (_, Strength::Slight) => format!("The article's tone is slightly {polarity}."),
        (_, Strength::Moderate) => format!("The article's tone is moderately {polarity}."),
        (_, Strength::Strong) => format!("The article's tone is strongly {polarity}."),
        (_, Strength::Extreme) => format!("The article's tone is overwhelmingly {polarity}."),
    };

    let mut paragraphs = vec![headline];
    if let Some(block) = evidence_block(&sentiment.evidence, |ev| {
        format!("The word \"{}\" carries {} sentiment.", ev.term, polarity)
    }) {
        paragraphs.push(block);
    }
    paragraphs.join("\n\n")
}

pub fn explain_objectivity(objectivity: &ScoreResult) -> String {
    let headline = match ObjectivityLabel::from_score(objectivity.score) {
        ObjectivityLabel::HighlyFactual => {
            "The article reads as highly factual reporting, anchored in attributed sources and figures."
        }
        ObjectivityLabel::PredominantlyFactual => {
            "The article is predominantly factual, with only occasional opinionated language."
        }
        ObjectivityLabel::Balanced => {
            "The article balances factual reporting with a measure of opinion."
        }
        ObjectivityLabel::SubstantialOpinion => {
            "The article contains substantial opinion alongside its factual content."
        }
        ObjectivityLabel::PredominantlyOpinion => {
            "The article is predominantly opinion, with evaluative language outweighing factual reporting."
        }
    };

    let objective = objectivity.score > super::evidence::OBJECTIVE_EVIDENCE_THRESHOLD;
    let mut paragraphs = vec![headline.to_string()];
    if let Some(block) = evidence_block(&objectivity.evidence, |ev| {
        if objective {
            format!(
                "The phrase \"{}\" signals attributed or data-driven reporting.",
                ev.term
            )
        } else {
            format!("The phrase \"{}\" signals the writer's own judgement.", ev.term)
        }
    }) {
        paragraphs.push(block);
    }
    paragraphs.join("\n\n")
}
