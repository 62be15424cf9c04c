// tests/thresholds.rs
//
// Boundary tests for the bias bands, driven end to end through real text:
// the left/right term mix is chosen so the score lands exactly on a band edge.

use news_bias_analyzer::analyze;
use news_bias_analyzer::analyze::interpret::{BiasLabel, ObjectivityLabel};

/// Text with `right` conservative mentions and `left` progressive mentions.
fn mix(right: usize, left: usize) -> String {
    let mut parts = Vec::new();
    for _ in 0..right {
        parts.push("A conservative spoke at the hall.");
    }
    for _ in 0..left {
        parts.push("A progressive spoke at the hall.");
    }
    parts.join(" ")
}

#[test]
fn band_edges_through_text() {
    let cases = [
        (1, 0, 1.0, "Extreme-Right"),
        (9, 1, 0.8, "Extreme-Right"),
        (7, 3, 0.4, "Right-leaning"),
        (3, 2, 0.2, "Slight-Right"),
        (1, 1, 0.0, "Neutral"),
        (2, 3, -0.2, "Slight-Left"),
        (3, 7, -0.4, "Left-leaning"),
        (1, 9, -0.8, "Extreme-Left"),
        (0, 4, -1.0, "Extreme-Left"),
    ];
    for (right, left, score, label) in cases {
        let r = analyze(&mix(right, left));
        assert_eq!(r.bias.base.score, score, "{right}R/{left}L");
        assert_eq!(r.bias.base.interpretation, label, "{right}R/{left}L");
    }
}

#[test]
fn labels_agree_with_interpreter() {
    for right in 0..6 {
        for left in 0..6 {
            let r = analyze(&mix(right, left));
            assert_eq!(
                r.bias.base.interpretation,
                BiasLabel::from_score(r.bias.base.score).as_str()
            );
            assert_eq!(
                r.objectivity.interpretation,
                ObjectivityLabel::from_score(r.objectivity.score).as_str()
            );
        }
    }
}

#[test]
fn confidence_statement_tracks_lean() {
    let r = analyze(&mix(3, 2)); // 20% lean
    assert!(r
        .bias
        .base
        .explanation
        .ends_with("Confidence in this assessment: 70%."));
    let r = analyze(&mix(7, 3)); // 40% lean
    assert!(r
        .bias
        .base
        .explanation
        .ends_with("Confidence in this assessment: 70%."));
    let r = analyze(&mix(4, 1)); // 60% lean
    assert!(r
        .bias
        .base
        .explanation
        .ends_with("Confidence in this assessment: 85%."));
}
