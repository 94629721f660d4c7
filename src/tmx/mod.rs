/*!
# TMX reading and writing

[TmxReader] lazily yields [TranslationUnit]s from a TMX document,
and [TmxWriter] writes sentence pairs as a minimal TMX document.

Inline markup found in `<seg>` elements is kept verbatim by the reader.
Since bitext has no markup, [TmxWriter] only ever writes plain, escaped text.
!*/
mod reader;
mod writer;

use std::collections::HashMap;

pub use reader::TmxReader;
pub use writer::TmxWriter;

/// One aligned multilingual record (`<tu>`), holding a segment for each language.
///
/// Language tags are compared ASCII case-insensitively: they are stored lowercased,
/// so `EN-us` and `en-US` name the same language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    segments: HashMap<String, String>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment, returning the segment previously held for that language.
    pub fn insert(&mut self, mut lang: String, segment: String) -> Option<String> {
        lang.make_ascii_lowercase();
        self.segments.insert(lang, segment)
    }

    /// Get the segment for `lang` (`en-us` matches `en-US`).
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.segments
            .get(&lang.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get the (source, target) segments. Absent languages are `None`.
    pub fn pair(&self, source: &str, target: &str) -> (Option<&str>, Option<&str>) {
        (self.get(source), self.get(target))
    }

    /// Lowercased language tags of the unit.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
