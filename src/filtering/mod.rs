/*! Filtering utilities

Filters operate on sentence pairs.

- [segment::SegmentFilter] normalizes a pair extracted from a translation unit and decides whether it is usable as training data.
- [pair] holds the length predicates ([pair::LengthDiff], [pair::LengthLimit], [pair::SentenceRatio]) that can be chained after it, configured through [pair::CleanStep].

Every filter implements [Filter], whose `detect` returns `true` for pairs that are kept.
! */
mod filter;
pub mod pair;
pub mod segment;

pub use filter::Filter;
pub use pair::CleanStep;
pub use segment::{MultilinePolicy, Rejection, SegmentFilter};
