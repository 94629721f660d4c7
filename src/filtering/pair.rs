//! Sentence pair length predicates.
//!
//! Lengths are counted in space-separated tokens.
//! These filters are meant to run on pairs that went through [super::SegmentFilter],
//! so tokens are separated by exactly one space.
use serde::{Deserialize, Serialize};

use super::Filter;

fn nb_tokens(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Discards pairs whose token counts differ by `diff` or more.
///
/// `diff` is 5 by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthDiff {
    diff: usize,
}

impl LengthDiff {
    pub fn new(diff: usize) -> Self {
        Self { diff }
    }

    pub fn diff(&self) -> usize {
        self.diff
    }
}

impl Default for LengthDiff {
    fn default() -> Self {
        Self { diff: 5 }
    }
}

impl Filter<(&str, &str)> for LengthDiff {
    fn detect(&self, (source, target): (&str, &str)) -> bool {
        nb_tokens(source).abs_diff(nb_tokens(target)) < self.diff
    }
}

/// Keeps pairs whose token counts are within inclusive `(min, max)` bounds,
/// one for each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthLimit {
    source: (usize, usize),
    target: (usize, usize),
}

impl LengthLimit {
    pub fn new(source: (usize, usize), target: (usize, usize)) -> Self {
        Self { source, target }
    }

    fn within((min, max): (usize, usize), len: usize) -> bool {
        (min..=max).contains(&len)
    }
}

impl Default for LengthLimit {
    /// 1 to 80 tokens on both sides.
    fn default() -> Self {
        Self {
            source: (1, 80),
            target: (1, 80),
        }
    }
}

impl Filter<(&str, &str)> for LengthLimit {
    fn detect(&self, (source, target): (&str, &str)) -> bool {
        Self::within(self.source, nb_tokens(source)) && Self::within(self.target, nb_tokens(target))
    }
}

/// Discards pairs where the longest side has more than `ratio` times
/// the tokens of the shortest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRatio {
    ratio: f64,
}

impl SentenceRatio {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl Default for SentenceRatio {
    fn default() -> Self {
        Self { ratio: 9.0 }
    }
}

impl Filter<(&str, &str)> for SentenceRatio {
    fn detect(&self, (source, target): (&str, &str)) -> bool {
        let (len_s, len_t) = (nb_tokens(source), nb_tokens(target));
        let (shortest, longest) = (len_s.min(len_t), len_s.max(len_t));
        if shortest == 0 {
            return false;
        }

        longest as f64 / shortest as f64 <= self.ratio
    }
}

/// A configured cleaning step.
///
/// Deserializes from objects tagged by `name`:
/// ```json
/// [
///   {"name": "length_diff", "diff": 5},
///   {"name": "length_limit", "source": [1, 24], "target": [1, 25]},
///   {"name": "sentence_ratio", "ratio": 9}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum CleanStep {
    LengthDiff(LengthDiff),
    LengthLimit(LengthLimit),
    SentenceRatio(SentenceRatio),
}

impl CleanStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LengthDiff(_) => "length_diff",
            Self::LengthLimit(_) => "length_limit",
            Self::SentenceRatio(_) => "sentence_ratio",
        }
    }
}

impl Default for CleanStep {
    fn default() -> Self {
        CleanStep::LengthDiff(LengthDiff::default())
    }
}

impl Filter<(&str, &str)> for CleanStep {
    fn detect(&self, pair: (&str, &str)) -> bool {
        match self {
            Self::LengthDiff(f) => f.detect(pair),
            Self::LengthLimit(f) => f.detect(pair),
            Self::SentenceRatio(f) => f.detect(pair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 24 tokens
    const SOURCE: &str = "With the world focused on Iraq, North Korea, and a possible clash with Iran over nuclear weapons, Kosovo has fallen off the radar screen.";
    // 25 tokens
    const TARGET: &str = "Während sich die Welt auf den Irak, Nordkorea und eine mögliche Auseinandersetzung mit dem Iran über Atomwaffen konzentriert, ist der Kosovo von der Bildfläche verschwunden.";
    // 18 tokens
    const TARGET_SHORT: &str = "Während sich die Welt auf den Irak, Nordkorea und eine mögliche Auseinandersetzung mit dem Iran über Atomwaffen konzentriert.";

    #[test]
    fn length_diff() {
        let f = LengthDiff::default();
        assert!(f.detect((SOURCE, TARGET)));
        assert!(!f.detect((SOURCE, TARGET_SHORT)));
        assert!(f.detect((SOURCE, SOURCE)));
    }

    #[test]
    fn length_diff_threshold_is_exclusive() {
        let f = LengthDiff::new(1);
        assert!(!f.detect(("word1 word2 word3", "wort1 wort2")));
        assert!(f.detect(("word1 word2", "wort1 wort2")));
    }

    #[test]
    fn length_limit() {
        assert!(LengthLimit::new((1, 24), (1, 25)).detect((SOURCE, TARGET)));
        assert!(!LengthLimit::new((1, 20), (1, 20)).detect((SOURCE, TARGET)));
        assert!(!LengthLimit::new((1, 24), (1, 24)).detect((SOURCE, TARGET)));
    }

    #[test]
    fn sentence_ratio() {
        let f = SentenceRatio::default();
        assert!(f.detect((SOURCE, TARGET)));
        assert!(!f.detect((SOURCE, "Während sich")));
        assert!(!f.detect((SOURCE, "")));
    }

    #[test]
    fn deserialize_steps() {
        let steps = r#"[
            {"name": "length_diff", "ext": "ldiff", "diff": 5},
            {"name": "length_limit", "source": [1, 24], "target": [1, 25]},
            {"name": "sentence_ratio", "ratio": 9}
        ]"#;
        let steps: Vec<CleanStep> = serde_json::from_str(steps).unwrap();

        assert_eq!(
            steps,
            vec![
                CleanStep::LengthDiff(LengthDiff::new(5)),
                CleanStep::LengthLimit(LengthLimit::new((1, 24), (1, 25))),
                CleanStep::SentenceRatio(SentenceRatio::new(9.0)),
            ]
        );
        assert!(steps.iter().all(|step| step.detect((SOURCE, TARGET))));
    }
}
