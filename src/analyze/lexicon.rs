//! Static term tables for the analysis engine.
//!
//! Topic and moral-foundation vocabularies hang off closed enums so every
//! lookup is exhaustive at compile time. Matching rules:
//! - bias / topic / marker terms: lower-case, counted as case-insensitive substrings
//! - moral foundation terms: whole tokens; a trailing `*` marks a prefix stem
//! - framing patterns: regexes over the lower-cased text, counted per match
//!
//! Keep terms lower-case and avoid entries that are substrings of an opposite-side
//! term (e.g. "regulation" vs "deregulation"), otherwise one phrase counts for both sides.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which side of the left/right axis a term list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Subject areas for the per-topic bias breakdown.
///
/// Declaration order is the display order and the order used by the topic
/// evidence pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Economic,
    Social,
    Environmental,
    Healthcare,
    Immigration,
    Foreign,
    Education,
    CriminalJustice,
    Technology,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::Economic,
        Topic::Social,
        Topic::Environmental,
        Topic::Healthcare,
        Topic::Immigration,
        Topic::Foreign,
        Topic::Education,
        Topic::CriminalJustice,
        Topic::Technology,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Economic => "economic",
            Topic::Social => "social",
            Topic::Environmental => "environmental",
            Topic::Healthcare => "healthcare",
            Topic::Immigration => "immigration",
            Topic::Foreign => "foreign",
            Topic::Education => "education",
            Topic::CriminalJustice => "criminal_justice",
            Topic::Technology => "technology",
        }
    }

    /// Phrase used in the topic breakdown paragraph.
    pub fn phrase(self) -> &'static str {
        match self {
            Topic::Economic => "Coverage of economic policy",
            Topic::Social => "Discussion of social issues",
            Topic::Environmental => "Treatment of environmental questions",
            Topic::Healthcare => "Framing of healthcare",
            Topic::Immigration => "Language around immigration",
            Topic::Foreign => "Commentary on foreign policy",
            Topic::Education => "Coverage of education",
            Topic::CriminalJustice => "Framing of crime and policing",
            Topic::Technology => "Discussion of technology regulation",
        }
    }

    pub fn terms(self, side: Side) -> &'static [&'static str] {
        match side {
            Side::Left => self.left_terms(),
            Side::Right => self.right_terms(),
        }
    }

    pub fn left_terms(self) -> &'static [&'static str] {
        match self {
            Topic::Economic => &[
                "inequality",
                "living wage",
                "minimum wage",
                "wealth tax",
                "social safety net",
                "public investment",
                "labor union",
                "worker rights",
                "corporate greed",
                "wealth redistribution",
                "progressive tax",
                "wealth gap",
                "corporate welfare",
                "fair wages",
                "economic justice",
            ],
            Topic::Social => &[
                "reproductive rights",
                "lgbtq",
                "racial justice",
                "diversity",
                "marginalized communities",
                "systemic racism",
                "social justice",
                "gender equality",
                "racial equity",
                "civil rights",
            ],
            Topic::Environmental => &[
                "climate crisis",
                "climate emergency",
                "green new deal",
                "renewable energy",
                "environmental justice",
                "carbon tax",
                "sustainability",
                "climate action",
                "clean energy",
                "pollution",
            ],
            Topic::Healthcare => &[
                "universal healthcare",
                "single-payer",
                "affordable care act",
                "medicare for all",
                "public option",
                "healthcare equity",
                "prescription drug prices",
                "healthcare access",
            ],
            Topic::Immigration => &[
                "pathway to citizenship",
                "dreamers",
                "asylum seekers",
                "family reunification",
                "undocumented immigrants",
                "sanctuary cities",
                "refugee protection",
                "immigrant rights",
            ],
            Topic::Foreign => &[
                "diplomacy",
                "international cooperation",
                "human rights",
                "foreign aid",
                "multilateral",
                "united nations",
                "peacekeeping",
                "soft power",
            ],
            Topic::Education => &[
                "public education",
                "education funding",
                "public schools",
                "student debt relief",
                "education equity",
                "universal pre-k",
            ],
            Topic::CriminalJustice => &[
                "criminal justice reform",
                "police accountability",
                "police reform",
                "prison reform",
                "restorative justice",
                "mass incarceration",
                "defund the police",
                "police brutality",
            ],
            Topic::Technology => &[
                "digital privacy",
                "net neutrality",
                "tech regulation",
                "data protection",
                "big tech accountability",
                "antitrust",
            ],
        }
    }

    pub fn right_terms(self) -> &'static [&'static str] {
        match self {
            Topic::Economic => &[
                "deregulation",
                "free market",
                "tax cut",
                "fiscal responsibility",
                "job creator",
                "economic freedom",
                "private sector",
                "trickle-down",
                "small government",
                "limited government",
                "free enterprise",
                "fiscal discipline",
                "business friendly",
                "entrepreneurship",
                "market solutions",
            ],
            Topic::Social => &[
                "traditional values",
                "family values",
                "religious freedom",
                "western civilization",
                "moral decay",
                "unborn",
                "traditional marriage",
                "national identity",
                "cultural heritage",
                "sanctity of life",
            ],
            Topic::Environmental => &[
                "overregulation",
                "clean coal",
                "energy independence",
                "job-killing regulations",
                "climate alarmism",
                "property rights",
                "energy dominance",
            ],
            Topic::Healthcare => &[
                "market-based healthcare",
                "health savings account",
                "private insurance",
                "personal responsibility",
                "healthcare choice",
                "healthcare freedom",
                "individual mandate",
                "rationing",
                "socialized medicine",
            ],
            Topic::Immigration => &[
                "border security",
                "illegal immigration",
                "merit-based immigration",
                "chain migration",
                "illegal aliens",
                "amnesty",
                "deportation",
                "border wall",
                "border control",
            ],
            Topic::Foreign => &[
                "strong military",
                "america first",
                "national security",
                "defense spending",
                "sovereignty",
                "military strength",
                "peace through strength",
            ],
            Topic::Education => &[
                "school choice",
                "parental rights",
                "voucher",
                "charter schools",
                "homeschool",
                "education freedom",
            ],
            Topic::CriminalJustice => &[
                "law and order",
                "tough on crime",
                "law enforcement",
                "public safety",
                "back the blue",
                "crime wave",
            ],
            Topic::Technology => &[
                "big tech censorship",
                "light-touch regulation",
                "digital freedom",
                "tech innovation",
                "market competition",
            ],
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moral Foundations Theory axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoralFoundation {
    Care,
    Fairness,
    Loyalty,
    Authority,
    Sanctity,
    Liberty,
}

impl MoralFoundation {
    pub const ALL: [MoralFoundation; 6] = [
        MoralFoundation::Care,
        MoralFoundation::Fairness,
        MoralFoundation::Loyalty,
        MoralFoundation::Authority,
        MoralFoundation::Sanctity,
        MoralFoundation::Liberty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoralFoundation::Care => "care",
            MoralFoundation::Fairness => "fairness",
            MoralFoundation::Loyalty => "loyalty",
            MoralFoundation::Authority => "authority",
            MoralFoundation::Sanctity => "sanctity",
            MoralFoundation::Liberty => "liberty",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            MoralFoundation::Care => &[
                "care",
                "caring",
                "harm",
                "harmed",
                "harmful",
                "protect*",
                "compassion*",
                "empath*",
                "suffer*",
                "cruel*",
                "vulnerable",
            ],
            MoralFoundation::Fairness => &[
                "fair",
                "fairness",
                "unfair*",
                "equal*",
                "justice",
                "injustice",
                "rights",
                "equity",
                "discriminat*",
            ],
            MoralFoundation::Loyalty => &[
                "loyal*",
                "solidarity",
                "patriot*",
                "betray*",
                "treason",
                "traitor*",
                "allegiance",
            ],
            MoralFoundation::Authority => &[
                "authority",
                "authorities",
                "tradition*",
                "respect*",
                "obey*",
                "obedien*",
                "order",
                "duty",
            ],
            MoralFoundation::Sanctity => &[
                "purity",
                "pure",
                "sacred",
                "disgust*",
                "sin",
                "sinful",
                "degradation",
                "holy",
                "decency",
            ],
            MoralFoundation::Liberty => &[
                "freedom*",
                "liberty",
                "liberties",
                "oppress*",
                "tyranny",
                "tyrann*",
                "restrict*",
                "coercion",
            ],
        }
    }

    /// True if `token` (already lower-case) matches any keyword of this foundation.
    pub fn matches(self, token: &str) -> bool {
        self.keywords().iter().any(|k| match k.strip_suffix('*') {
            Some(stem) => token.starts_with(stem),
            None => token == *k,
        })
    }
}

impl std::fmt::Display for MoralFoundation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partisan vocabulary that is not tied to a single topic.
const GENERAL_LEFT: &[&str] = &["liberal", "progressive", "democrat", "left-wing"];
const GENERAL_RIGHT: &[&str] = &["conservative", "republican", "right-wing"];

static GLOBAL_LEFT: Lazy<Vec<&'static str>> = Lazy::new(|| build_global(Side::Left));
static GLOBAL_RIGHT: Lazy<Vec<&'static str>> = Lazy::new(|| build_global(Side::Right));

fn build_global(side: Side) -> Vec<&'static str> {
    let general = match side {
        Side::Left => GENERAL_LEFT,
        Side::Right => GENERAL_RIGHT,
    };
    let mut out: Vec<&'static str> = Vec::new();
    let topic_terms = Topic::ALL.iter().flat_map(|t| t.terms(side).iter().copied());
    for term in general.iter().copied().chain(topic_terms) {
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

/// Whole-text left or right lexicon: general terms followed by every topic's list.
pub fn global_terms(side: Side) -> &'static [&'static str] {
    match side {
        Side::Left => GLOBAL_LEFT.as_slice(),
        Side::Right => GLOBAL_RIGHT.as_slice(),
    }
}

/// Narrative frames that signal a side even where no single lexicon term does.
const LEFT_FRAME_PATTERNS: &[&str] = &[
    r"economic inequality",
    r"systemic (racism|discrimination)",
    r"(human|civil) rights",
    r"(undocumented|unauthorized) immigrants",
    r"climate (crisis|emergency)",
    r"(worker|labor) rights",
    r"(affordable|universal) healthcare",
    r"corporate greed",
];
const RIGHT_FRAME_PATTERNS: &[&str] = &[
    r"free market",
    r"personal responsibility",
    r"(illegal|undocumented) aliens",
    r"family values",
    r"job creators",
    r"government overreach",
    r"religious (freedom|liberty)",
    r"law and order",
];

static LEFT_FRAMES: Lazy<Vec<Regex>> = Lazy::new(|| compile_frames(LEFT_FRAME_PATTERNS));
static RIGHT_FRAMES: Lazy<Vec<Regex>> = Lazy::new(|| compile_frames(RIGHT_FRAME_PATTERNS));

fn compile_frames(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("frame pattern"))
        .collect()
}

/// Framing-pattern matches for one side. `lower` must already be lower-case.
pub fn count_frames(lower: &str, side: Side) -> usize {
    let frames = match side {
        Side::Left => &LEFT_FRAMES,
        Side::Right => &RIGHT_FRAMES,
    };
    frames.iter().map(|re| re.find_iter(lower).count()).sum()
}

/// Attribution and data phrases typical of factual reporting.
pub const OBJECTIVE_MARKERS: &[&str] = &[
    "according to",
    "reported",
    "percent",
    "statistics",
    "data",
    "study",
    "survey",
    "research",
    "census",
    "announced",
    "confirmed",
    "estimated",
    "officials said",
    "spokesperson",
    "records show",
];

/// Opinion, hedging and intensity phrases.
pub const SUBJECTIVE_MARKERS: &[&str] = &[
    "i think",
    "i believe",
    "we believe",
    "in my opinion",
    "clearly",
    "obviously",
    "undoubtedly",
    "arguably",
    "unfortunately",
    "fortunately",
    "outrageous",
    "shocking",
    "disgraceful",
    "ridiculous",
    "absurd",
    "terrible",
    "wonderful",
    "amazing",
    "incredibly",
    "disastrous",
    "brilliant",
    "pathetic",
    "should",
    "must",
];

/// Generic framing/intensity words used by the last-resort evidence pass.
pub const FRAMING_WORDS: &[&str] = &[
    "should",
    "must",
    "crucial",
    "essential",
    "critical",
    "vital",
    "urgent",
    "outrageous",
    "unacceptable",
    "dangerous",
    "shameful",
    "disaster",
    "radical",
    "extreme",
];

/// Words within this many preceding tokens flip a sentiment word's valence.
pub const NEGATION_WINDOW: usize = 3;

pub fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "don't"
            | "doesn't"
            | "didn't"
            | "without"
    )
}

/// Count non-overlapping occurrences of every term in `terms` within `haystack`.
/// `haystack` must already be lower-case.
pub fn count_terms(haystack: &str, terms: &[&str]) -> usize {
    terms.iter().map(|t| haystack.matches(t).count()).sum()
}

/// First term (in list order) that occurs in `haystack`, if any.
/// `haystack` must already be lower-case.
pub fn first_match<'a>(haystack: &str, terms: &[&'a str]) -> Option<&'a str> {
    terms.iter().copied().find(|t| haystack.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_lists_start_with_general_terms_and_have_no_duplicates() {
        let left = global_terms(Side::Left);
        assert_eq!(&left[..GENERAL_LEFT.len()], GENERAL_LEFT);
        let mut sorted = left.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), left.len());

        let right = global_terms(Side::Right);
        assert!(right.contains(&"conservative"));
        assert!(right.contains(&"tax cut"));
        assert!(right.contains(&"free market"));
    }

    #[test]
    fn frames_count_each_match() {
        let text = "systemic racism and systemic discrimination shape worker rights";
        assert_eq!(count_frames(text, Side::Left), 3);
        assert_eq!(count_frames(text, Side::Right), 0);

        let text = "warnings of government overreach on religious liberty and illegal aliens";
        assert_eq!(count_frames(text, Side::Right), 3);
        assert_eq!(count_frames(text, Side::Left), 0);
    }

    #[test]
    fn no_right_term_contains_a_left_term() {
        let left = global_terms(Side::Left);
        for r in global_terms(Side::Right) {
            for l in left {
                assert!(!r.contains(l), "right term `{r}` contains left term `{l}`");
                assert!(!l.contains(r), "left term `{l}` contains right term `{r}`");
            }
        }
    }

    #[test]
    fn terms_are_lower_case() {
        let all = global_terms(Side::Left)
            .iter()
            .chain(global_terms(Side::Right))
            .chain(OBJECTIVE_MARKERS)
            .chain(SUBJECTIVE_MARKERS)
            .chain(FRAMING_WORDS);
        for t in all {
            assert_eq!(*t, t.to_lowercase());
        }
    }

    #[test]
    fn moral_stems_match_prefixes_only_when_starred() {
        assert!(MoralFoundation::Care.matches("protecting"));
        assert!(MoralFoundation::Care.matches("harm"));
        assert!(!MoralFoundation::Care.matches("harmony"));
        assert!(MoralFoundation::Liberty.matches("freedoms"));
        assert!(MoralFoundation::Fairness.matches("unfairly"));
        assert!(!MoralFoundation::Authority.matches("orders"));
    }

    #[test]
    fn substring_counting_is_non_overlapping() {
        let text = "tax cuts and more tax cuts";
        assert_eq!(count_terms(text, &["tax cut"]), 2);
        assert_eq!(first_match(text, &["wealth tax", "tax cut"]), Some("tax cut"));
        assert_eq!(first_match(text, &["wealth tax"]), None);
    }

    #[test]
    fn topic_names_round_trip_through_serde() {
        let v = serde_json::to_value(Topic::CriminalJustice).unwrap();
        assert_eq!(v, serde_json::json!("criminal_justice"));
        assert_eq!(Topic::CriminalJustice.to_string(), "criminal_justice");
    }
}
