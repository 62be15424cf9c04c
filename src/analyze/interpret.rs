//! Threshold bands that turn scores into labels.
//!
//! Comparison operators are part of the contract: `0.4` is Right-leaning
//! (`< 0.4` fails), `-0.4` is Left-leaning (`<= -0.4` holds), objectivity
//! `0.5` is Substantial opinion (`> 0.5` fails).

use std::fmt;

use super::lexicon::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasLabel {
    ExtremeLeft,
    LeftLeaning,
    SlightLeft,
    Neutral,
    SlightRight,
    RightLeaning,
    ExtremeRight,
}

impl BiasLabel {
    pub fn from_score(score: f64) -> Self {
        if score <= -0.8 {
            BiasLabel::ExtremeLeft
        } else if score <= -0.4 {
            BiasLabel::LeftLeaning
        } else if score < 0.0 {
            BiasLabel::SlightLeft
        } else if score == 0.0 {
            BiasLabel::Neutral
        } else if score < 0.4 {
            BiasLabel::SlightRight
        } else if score < 0.8 {
            BiasLabel::RightLeaning
        } else {
            BiasLabel::ExtremeRight
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BiasLabel::ExtremeLeft => "Extreme-Left",
            BiasLabel::LeftLeaning => "Left-leaning",
            BiasLabel::SlightLeft => "Slight-Left",
            BiasLabel::Neutral => "Neutral",
            BiasLabel::SlightRight => "Slight-Right",
            BiasLabel::RightLeaning => "Right-leaning",
            BiasLabel::ExtremeRight => "Extreme-Right",
        }
    }

    /// Which lexicon substantiates this label; `None` for Neutral.
    pub fn side(self) -> Option<Side> {
        match self {
            BiasLabel::ExtremeLeft | BiasLabel::LeftLeaning | BiasLabel::SlightLeft => {
                Some(Side::Left)
            }
            BiasLabel::Neutral => None,
            BiasLabel::SlightRight | BiasLabel::RightLeaning | BiasLabel::ExtremeRight => {
                Some(Side::Right)
            }
        }
    }
}

/// Magnitude band of a signed score, used to pick explanation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Minimal,
    Slight,
    Moderate,
    Strong,
    Extreme,
}

impl Strength {
    pub fn from_score(score: f64) -> Self {
        let a = score.abs();
        if a < 0.1 {
            Strength::Minimal
        } else if a < 0.3 {
            Strength::Slight
        } else if a < 0.6 {
            Strength::Moderate
        } else if a < 0.8 {
            Strength::Strong
        } else {
            Strength::Extreme
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Minimal => "minimal",
            Strength::Slight => "slight",
            Strength::Moderate => "moderate",
            Strength::Strong => "strong",
            Strength::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if Strength::from_score(score) == Strength::Minimal {
            SentimentLabel::Neutral
        } else if score > 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectivityLabel {
    HighlyFactual,
    PredominantlyFactual,
    Balanced,
    SubstantialOpinion,
    PredominantlyOpinion,
}

impl ObjectivityLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.9 {
            ObjectivityLabel::HighlyFactual
        } else if score > 0.7 {
            ObjectivityLabel::PredominantlyFactual
        } else if score > 0.5 {
            ObjectivityLabel::Balanced
        } else if score > 0.3 {
            ObjectivityLabel::SubstantialOpinion
        } else {
            ObjectivityLabel::PredominantlyOpinion
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectivityLabel::HighlyFactual => "Highly factual",
            ObjectivityLabel::PredominantlyFactual => "Predominantly factual",
            ObjectivityLabel::Balanced => "Balanced",
            ObjectivityLabel::SubstantialOpinion => "Substantial opinion",
            ObjectivityLabel::PredominantlyOpinion => "Predominantly opinion",
        }
    }
}

macro_rules! display_via_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(BiasLabel, Strength, SentimentLabel, ObjectivityLabel);

/// Integer percentage shown in the bias explanation: `round(|score| * 100)`.
pub fn lean_percent(score: f64) -> i64 {
    (score.abs() * 100.0).round() as i64
}

/// Confidence statement for bias: `min(95, max(70, pct + 25))`.
pub fn confidence_percent(score: f64) -> i64 {
    (lean_percent(score) + 25).clamp(70, 95)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_bands_follow_operator_directions() {
        let cases = [
            (-1.0, BiasLabel::ExtremeLeft),
            (-0.8, BiasLabel::ExtremeLeft),
            (-0.79, BiasLabel::LeftLeaning),
            (-0.4, BiasLabel::LeftLeaning),
            (-0.39, BiasLabel::SlightLeft),
            (-0.0001, BiasLabel::SlightLeft),
            (0.0, BiasLabel::Neutral),
            (0.0001, BiasLabel::SlightRight),
            (0.39, BiasLabel::SlightRight),
            (0.4, BiasLabel::RightLeaning),
            (0.79, BiasLabel::RightLeaning),
            (0.8, BiasLabel::ExtremeRight),
            (1.0, BiasLabel::ExtremeRight),
        ];
        for (score, want) in cases {
            assert_eq!(BiasLabel::from_score(score), want, "score {score}");
        }
    }

    #[test]
    fn strength_bands() {
        assert_eq!(Strength::from_score(0.0), Strength::Minimal);
        assert_eq!(Strength::from_score(-0.0999), Strength::Minimal);
        assert_eq!(Strength::from_score(0.1), Strength::Slight);
        assert_eq!(Strength::from_score(-0.3), Strength::Moderate);
        assert_eq!(Strength::from_score(0.6), Strength::Strong);
        assert_eq!(Strength::from_score(-0.8), Strength::Extreme);
    }

    #[test]
    fn sentiment_uses_magnitude_then_sign() {
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.0999), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.1), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.45), SentimentLabel::Negative);
    }

    #[test]
    fn objectivity_bands_are_strict() {
        assert_eq!(ObjectivityLabel::from_score(0.95), ObjectivityLabel::HighlyFactual);
        assert_eq!(ObjectivityLabel::from_score(0.9), ObjectivityLabel::PredominantlyFactual);
        assert_eq!(ObjectivityLabel::from_score(0.7), ObjectivityLabel::Balanced);
        assert_eq!(ObjectivityLabel::from_score(0.6), ObjectivityLabel::Balanced);
        assert_eq!(
            ObjectivityLabel::from_score(0.5),
            ObjectivityLabel::SubstantialOpinion
        );
        assert_eq!(
            ObjectivityLabel::from_score(0.3),
            ObjectivityLabel::PredominantlyOpinion
        );
    }

    #[test]
    fn label_sides() {
        assert_eq!(BiasLabel::SlightLeft.side(), Some(Side::Left));
        assert_eq!(BiasLabel::Neutral.side(), None);
        assert_eq!(BiasLabel::ExtremeRight.side(), Some(Side::Right));
    }

    #[test]
    fn confidence_is_clamped_between_70_and_95() {
        assert_eq!(confidence_percent(0.0), 70);
        assert_eq!(confidence_percent(0.5), 75);
        assert_eq!(confidence_percent(-0.6), 85);
        assert_eq!(confidence_percent(1.0), 95);
        assert_eq!(lean_percent(-0.333), 33);
    }
}
