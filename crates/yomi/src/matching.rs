//! Matching normalized answers against accepted readings.

use crate::table::KanjiEntry;
use yomi_core::Outcome;

/// Checks whether the normalized answer is exactly one of the entry's accepted readings.
pub fn check(normalized: &str, entry: &KanjiEntry) -> Outcome {
    if normalized.is_empty() {
        Outcome::Empty
    } else if entry.accepts(normalized) {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}
