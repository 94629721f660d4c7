//! Segment pair normalization and validity filtering.
//!
//! A pair extracted from a translation unit goes through these steps, in order:
//!
//! 1. reject if one of the segments is missing,
//! 2. multiline segments are either blanked out or joined with spaces (see [MultilinePolicy]),
//! 3. whitespace runs are collapsed into a single space and both ends are trimmed,
//! 4. a source that has no token containing an alphabetic character is blanked out,
//! 5. reject if any side is empty,
//! 6. reject if both sides are identical,
//! 7. run the configured [CleanStep]s.
//!
//! Note that two blanked-out multiline segments are rejected at step 5, not at step 6.
use std::borrow::Cow;
use std::fmt;

use itertools::Itertools;
use log::debug;

use super::{CleanStep, Filter};

/// What to do with segments spanning multiple lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultilinePolicy {
    /// replace the segment with an empty string.
    #[default]
    Blank,
    /// join lines with a single space.
    Join,
}

/// Reason a pair has been discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    /// the translation unit lacks the source or target language.
    MissingSegment,
    Empty,
    /// the source has no token with an alphabetic character.
    NoAlphabeticContent,
    Identical,
    /// discarded by the named cleaning step.
    Cleaning(&'static str),
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MissingSegment => "missing_segment",
            Rejection::Empty => "empty",
            Rejection::NoAlphabeticContent => "no_alphabetic_content",
            Rejection::Identical => "identical",
            Rejection::Cleaning(step) => *step,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits on line boundaries.
///
/// `\n`, `\r`, `\r\n` and the unicode line/paragraph separators are boundaries.
/// A trailing boundary does not open a new line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary_len = match c {
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                chars.next();
                2
            }
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}' => c.len_utf8(),
            _ => continue,
        };
        lines.push(&text[start..idx]);
        start = idx + boundary_len;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Collapses whitespace runs into a single space, trimming both ends.
///
/// Running it on already collapsed text leaves it untouched.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// `true` if at least one whitespace-delimited token contains an alphabetic character.
pub fn has_alphabetic_token(text: &str) -> bool {
    text.split_whitespace()
        .any(|token| token.chars().any(char::is_alphabetic))
}

/// Decides whether a (source, target) pair is usable, and normalizes it.
#[derive(Debug, Clone, Default)]
pub struct SegmentFilter {
    multiline: MultilinePolicy,
    steps: Vec<CleanStep>,
}

impl SegmentFilter {
    pub fn new(multiline: MultilinePolicy, steps: Vec<CleanStep>) -> Self {
        Self { multiline, steps }
    }

    /// Get a reference to the cleaning steps.
    pub fn steps(&self) -> &[CleanStep] {
        &self.steps
    }

    fn unfold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let lines = split_lines(text);
        if lines.len() <= 1 {
            return Cow::Borrowed(text);
        }

        match self.multiline {
            MultilinePolicy::Blank => Cow::Borrowed(""),
            MultilinePolicy::Join => Cow::Owned(lines.join(" ")),
        }
    }

    /// Normalize and filter a pair.
    ///
    /// `None` stands for a language that is absent from the translation unit.
    pub fn filter(
        &self,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<(String, String), Rejection> {
        let (source, target) = match (source, target) {
            (Some(s), Some(t)) => (s, t),
            _ => return Err(Rejection::MissingSegment),
        };

        let mut source = collapse_whitespace(&self.unfold(source));
        let target = collapse_whitespace(&self.unfold(target));

        let mut no_alphabetic = false;
        if !has_alphabetic_token(&source) {
            no_alphabetic = !source.is_empty();
            source.clear();
        }

        if source.is_empty() || target.is_empty() {
            return Err(if no_alphabetic {
                Rejection::NoAlphabeticContent
            } else {
                Rejection::Empty
            });
        }

        if source == target {
            return Err(Rejection::Identical);
        }

        if let Some(step) = self
            .steps
            .iter()
            .find(|step| !step.detect((source.as_str(), target.as_str())))
        {
            debug!("pair discarded by {}: {:?}", step.name(), source);
            return Err(Rejection::Cleaning(step.name()));
        }

        Ok((source, target))
    }
}

impl Filter<(&str, &str)> for SegmentFilter {
    fn detect(&self, (source, target): (&str, &str)) -> bool {
        self.filter(Some(source), Some(target)).is_ok()
    }
}
