//! Reduces raw answers to the canonical hiragana form used for matching.

use crate::{
    romaji::Transliterator,
    table::{KanjiEntry, KanjiTable},
};
use std::borrow::Cow;
use thiserror::Error;
use yomi_core::{
    kana,
    script::{self, IdeographRange, CJK_UNIFIED_IDEOGRAPHS},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("{0:#X} is not a valid code point")]
    InvalidCodePoint(u32),
    #[error("The ideograph range cannot end at {0:#X}, before it starts")]
    EndsBeforeStart(u32),
}

/// Returns the ideograph range starting at U+4E00 and ending at `end`.
pub fn ideograph_range_ending_at(end: u32) -> Result<IdeographRange, RangeError> {
    let end = char::from_u32(end).ok_or(RangeError::InvalidCodePoint(end))?;
    IdeographRange::new(*CJK_UNIFIED_IDEOGRAPHS.start(), end)
        .ok_or(RangeError::EndsBeforeStart(end as u32))
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Characters in this range are replaced by their readings.
    pub kanji_range: IdeographRange,
    pub transliterator: Transliterator,
}

/// Normalizes a raw answer to the given prompt into hiragana without whitespace.
///
/// If the prompt's kanji appears anywhere in the answer, the answer is replaced by the
/// prompt's canonical reading, whether or not the kanji is inside the configured range.
/// Answering with the prompt's kanji itself is always correct.
/// Otherwise, if the answer contains kanji from the range, it is replaced by the canonical
/// reading of the first one, or nothing if that kanji is not in the table.
///
/// Otherwise, romaji is transliterated and katakana is folded into hiragana.
/// Never fails, garbage in results in garbage out which simply won't match any reading.
pub fn normalize(
    raw: &str,
    prompt: &KanjiEntry,
    table: &KanjiTable,
    options: &NormalizeOptions,
) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let answer = trimmed.to_lowercase();

    if answer.contains(prompt.character()) {
        tracing::debug!("Answer '{answer}' contains the prompt {}", prompt.character());
        return prompt.canonical_reading().to_string();
    }
    if let Some(first_kanji) = options.kanji_range.find_in(&answer) {
        return resolve_kanji(first_kanji, table);
    }

    let answer = if script::contains_latin(&answer) {
        options.transliterator.transliterate(&answer)
    } else {
        Cow::Borrowed(answer.as_str())
    };
    let answer = if script::contains_katakana(&answer) {
        Cow::Owned(kana::katakana_to_hiragana(&answer))
    } else {
        answer
    };
    let normalized: String = answer.chars().filter(|c| !c.is_whitespace()).collect();
    tracing::trace!("Normalized '{raw}' to '{normalized}'");
    normalized
}

fn resolve_kanji(first_kanji: char, table: &KanjiTable) -> String {
    match table.resolve(first_kanji) {
        Some(reading) => reading.to_string(),
        None => {
            tracing::debug!("{first_kanji} is not in the kanji table");
            String::new()
        }
    }
}
