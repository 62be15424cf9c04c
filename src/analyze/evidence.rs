//! Evidence sentence selection.
//!
//! Sentences are pieces of the input between `.`, `!` and `?`, trimmed.
//! Selection for bias runs up to three passes, each only when the previous
//! ones came up short:
//!
//! 1. direct: the global lexicon on the label's side, in sentence order
//! 2. topic: each topic's vocabulary, topics in map order
//! 3. framing: generic intensity words, only when nothing was found yet
//!    and some topic leans past `FRAMING_TOPIC_THRESHOLD`
//!
//! Sentiment and objectivity use the direct pass alone with a quota of one.
//! A sentence never appears twice in one result.

use super::interpret::{BiasLabel, SentimentLabel};
use super::lexicon::{
    first_match, global_terms, Side, Topic, FRAMING_WORDS, OBJECTIVE_MARKERS,
    SUBJECTIVE_MARKERS,
};
use crate::report::{EvidenceSentence, EvidenceSource, TopicAnalysis};
use crate::sentiment::SentimentAnalyzer;

pub const MAX_BIAS_EVIDENCE: usize = 3;
pub const MAX_SINGLE_EVIDENCE: usize = 1;
pub const MAX_FRAMING_EVIDENCE: usize = 2;

pub const MIN_SENTENCE_CHARS: usize = 10;
pub const MIN_FRAMING_SENTENCE_CHARS: usize = 15;

/// A topic must lean at least this far before framing words count as evidence.
pub const FRAMING_TOPIC_THRESHOLD: f64 = 0.3;

/// Objectivity above this is substantiated with objective markers, otherwise subjective ones.
pub const OBJECTIVE_EVIDENCE_THRESHOLD: f64 = 0.7;

/// Trimmed sentences with at least `min_chars` characters, in input order.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<&str> {
    text.split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| s.chars().count() >= min_chars)
        .collect()
}

/// Accumulates picks and enforces uniqueness.
struct Picks {
    items: Vec<EvidenceSentence>,
}

impl Picks {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn contains(&self, sentence: &str) -> bool {
        self.items.iter().any(|e| e.sentence == sentence)
    }

    /// Scan `sentences` in order and take those matching `terms` until `quota` is reached.
    fn scan(&mut self, sentences: &[&str], terms: &[&str], source: EvidenceSource, quota: usize) {
        self.scan_with(sentences, source, quota, |s| {
            first_match(&s.to_lowercase(), terms).map(str::to_string)
        });
    }

    /// Like `scan`, with `matcher` naming the term a sentence qualifies by.
    fn scan_with(
        &mut self,
        sentences: &[&str],
        source: EvidenceSource,
        quota: usize,
        matcher: impl Fn(&str) -> Option<String>,
    ) {
        for s in sentences {
            if self.len() >= quota {
                return;
            }
            if self.contains(s) {
                continue;
            }
            if let Some(term) = matcher(s) {
                self.items.push(EvidenceSentence {
                    sentence: (*s).to_string(),
                    term,
                    source,
                });
            }
        }
    }
}

/// Up to three sentences supporting a bias label.
pub fn bias_evidence(
    text: &str,
    label: BiasLabel,
    topics: Option<&TopicAnalysis>,
) -> Vec<EvidenceSentence> {
    let sentences = split_sentences(text, MIN_SENTENCE_CHARS);
    let mut picks = Picks::new();

    if let Some(side) = label.side() {
        picks.scan(
            &sentences,
            global_terms(side),
            EvidenceSource::Direct,
            MAX_BIAS_EVIDENCE,
        );
    }

    let Some(topics) = topics else {
        return picks.items;
    };

    if picks.len() < MAX_BIAS_EVIDENCE {
        for topic in topics.keys() {
            if picks.len() >= MAX_BIAS_EVIDENCE {
                break;
            }
            let terms = topic_terms(*topic);
            picks.scan(
                &sentences,
                &terms,
                EvidenceSource::Topic(*topic),
                MAX_BIAS_EVIDENCE,
            );
        }
    }

    let leaning_topic = topics
        .values()
        .any(|t| t.score.abs() > FRAMING_TOPIC_THRESHOLD);
    if picks.is_empty() && leaning_topic {
        let long = split_sentences(text, MIN_FRAMING_SENTENCE_CHARS);
        picks.scan(
            &long,
            FRAMING_WORDS,
            EvidenceSource::Framing,
            MAX_FRAMING_EVIDENCE,
        );
    }

    picks.items
}

/// The whole topic vocabulary, left-coded terms first.
fn topic_terms(topic: Topic) -> Vec<&'static str> {
    topic
        .left_terms()
        .iter()
        .chain(topic.right_terms())
        .copied()
        .collect()
}

/// At most one sentence carrying the label's sentiment; none for Neutral.
///
/// Words are matched as whole tokens with negation applied, the same way they are scored.
pub fn sentiment_evidence(text: &str, label: SentimentLabel) -> Vec<EvidenceSentence> {
    let positive = match label {
        SentimentLabel::Positive => true,
        SentimentLabel::Negative => false,
        SentimentLabel::Neutral => return Vec::new(),
    };
    let analyzer = SentimentAnalyzer::new();
    let sentences = split_sentences(text, MIN_SENTENCE_CHARS);
    let mut picks = Picks::new();
    picks.scan_with(&sentences, EvidenceSource::Direct, MAX_SINGLE_EVIDENCE, |s| {
        analyzer.first_charged_word(s, positive)
    });
    picks.items
}

/// At most one sentence with objective markers (score > 0.7) or subjective markers.
pub fn objectivity_evidence(text: &str, score: f64) -> Vec<EvidenceSentence> {
    let terms = if score > OBJECTIVE_EVIDENCE_THRESHOLD {
        OBJECTIVE_MARKERS
    } else {
        SUBJECTIVE_MARKERS
    };
    let sentences = split_sentences(text, MIN_SENTENCE_CHARS);
    let mut picks = Picks::new();
    picks.scan(&sentences, terms, EvidenceSource::Direct, MAX_SINGLE_EVIDENCE);
    picks.items
}

/// Which side of the spectrum a collected term came from, if any.
pub fn term_side(term: &str) -> Option<Side> {
    if global_terms(Side::Left).contains(&term) {
        Some(Side::Left)
    } else if global_terms(Side::Right).contains(&term) {
        Some(Side::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TopicScore;

    fn topics(entries: &[(Topic, f64, usize, usize)]) -> TopicAnalysis {
        entries
            .iter()
            .map(|(t, score, l, r)| {
                (
                    *t,
                    TopicScore {
                        score: *score,
                        left_terms: *l,
                        right_terms: *r,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn split_drops_short_pieces_and_trims() {
        let s = split_sentences("Hi. This one is long enough!  Ok?  Another fine sentence  ", 10);
        assert_eq!(s, vec!["This one is long enough", "Another fine sentence"]);
        assert!(split_sentences("", 10).is_empty());
        assert!(split_sentences("...!!!???", 1).is_empty());
    }

    #[test]
    fn direct_pass_takes_first_three_in_order() {
        let text = "The free market works. A tax cut passed today. Rain fell all day long. \
                    Deregulation helps firms. Private sector hiring rose again.";
        let ev = bias_evidence(text, BiasLabel::ExtremeRight, None);
        let got: Vec<&str> = ev.iter().map(|e| e.sentence.as_str()).collect();
        assert_eq!(
            got,
            vec![
                "The free market works",
                "A tax cut passed today",
                "Deregulation helps firms"
            ]
        );
        assert!(ev.iter().all(|e| e.source == EvidenceSource::Direct));
        assert_eq!(ev[1].term, "tax cut");
    }

    #[test]
    fn left_label_uses_left_lexicon() {
        let text = "Conservative leaders met again. Progressive voices demanded a living wage.";
        let ev = bias_evidence(text, BiasLabel::SlightLeft, None);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].sentence, "Progressive voices demanded a living wage");
        assert_eq!(ev[0].term, "progressive");
    }

    #[test]
    fn topic_pass_fills_remaining_quota_in_topic_order() {
        // Neutral label: pass 1 is skipped entirely.
        let text = "Calls for border security grew louder. \
                    Supporters of school choice rallied at the capitol. \
                    Nothing else of note happened here.";
        let t = topics(&[
            (Topic::Immigration, 1.0, 0, 1),
            (Topic::Education, 1.0, 0, 1),
        ]);
        let ev = bias_evidence(text, BiasLabel::Neutral, Some(&t));
        assert_eq!(ev.len(), 2);
        assert_eq!(ev[0].source, EvidenceSource::Topic(Topic::Immigration));
        assert_eq!(ev[0].term, "border security");
        assert_eq!(ev[1].source, EvidenceSource::Topic(Topic::Education));
    }

    #[test]
    fn topic_pass_never_repeats_direct_picks() {
        let text = "Border security and deportation dominated the debate tonight.";
        let t = topics(&[(Topic::Immigration, 1.0, 0, 2)]);
        let ev = bias_evidence(text, BiasLabel::ExtremeRight, Some(&t));
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].source, EvidenceSource::Direct);
    }

    #[test]
    fn topic_pass_scans_both_sides_of_the_topic() {
        // Economic leans left, yet its right-coded sentence still fills the quota.
        let text = "A tax cut was floated by some. We need a living wage now. Inequality keeps rising fast.";
        let t = topics(&[(Topic::Economic, -1.0 / 3.0, 2, 1)]);
        let ev = bias_evidence(text, BiasLabel::SlightLeft, Some(&t));
        let terms: Vec<_> = ev.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["living wage", "inequality", "tax cut"]);
        assert_eq!(ev[2].sentence, "A tax cut was floated by some");
        assert_eq!(ev[2].source, EvidenceSource::Topic(Topic::Economic));
    }

    #[test]
    fn framing_pass_runs_only_when_empty_and_a_topic_leans() {
        let text = "We must act now before it is too late. Short one. This is crucial for everyone here.";
        let leaning = topics(&[(Topic::Environmental, -0.5, 3, 1)]);
        let ev = bias_evidence(text, BiasLabel::Neutral, Some(&leaning));
        assert_eq!(ev.len(), 2);
        assert!(ev.iter().all(|e| e.source == EvidenceSource::Framing));
        assert_eq!(ev[0].term, "must");
        assert_eq!(ev[1].term, "crucial");

        let flat = topics(&[(Topic::Environmental, 0.3, 1, 1)]);
        assert!(bias_evidence(text, BiasLabel::Neutral, Some(&flat)).is_empty());
        assert!(bias_evidence(text, BiasLabel::Neutral, None).is_empty());
    }

    #[test]
    fn framing_pass_needs_fifteen_chars() {
        let text = "We must act now. You must go";
        let leaning = topics(&[(Topic::Foreign, 1.0, 0, 2)]);
        let ev = bias_evidence(text, BiasLabel::Neutral, Some(&leaning));
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].sentence, "We must act now");
    }

    #[test]
    fn duplicate_sentences_are_returned_once() {
        let text = "The free market decides. The free market decides. The free market decides.";
        let ev = bias_evidence(text, BiasLabel::ExtremeRight, None);
        assert_eq!(ev.len(), 1);
    }

    #[test]
    fn sentiment_and_objectivity_take_one() {
        let text = "The rollout was a terrible failure. Officials called it a disaster.";
        let ev = sentiment_evidence(text, SentimentLabel::Negative);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].sentence, "The rollout was a terrible failure");
        assert!(sentiment_evidence(text, SentimentLabel::Neutral).is_empty());

        let text = "Clearly nobody cares. According to the report, 40 percent agreed.";
        let obj = objectivity_evidence(text, 0.8);
        assert_eq!(obj[0].term, "according to");
        let subj = objectivity_evidence(text, 0.7);
        assert_eq!(subj[0].term, "clearly");
    }

    #[test]
    fn sentiment_words_do_not_match_inside_other_words() {
        let text = "The ruling was deeply unfair to workers. \
                    Officials praised the excellent and wonderful outcome.";
        let ev = sentiment_evidence(text, SentimentLabel::Positive);
        assert_eq!(ev.len(), 1);
        assert_eq!(
            ev[0].sentence,
            "Officials praised the excellent and wonderful outcome"
        );
        assert_eq!(ev[0].term, "praised");

        let neg = sentiment_evidence(text, SentimentLabel::Negative);
        assert_eq!(neg[0].term, "unfair");
    }

    #[test]
    fn evidence_is_literal_input_text() {
        let text = "  Mixed CASE Free Market talk here!  ";
        let ev = bias_evidence(text, BiasLabel::RightLeaning, None);
        assert_eq!(ev.len(), 1);
        assert!(text.contains(&ev[0].sentence));
        assert_eq!(ev[0].term, "free market");
    }

    #[test]
    fn term_sides() {
        assert_eq!(term_side("tax cut"), Some(Side::Right));
        assert_eq!(term_side("living wage"), Some(Side::Left));
        assert_eq!(term_side("must"), None);
    }
}
