//! Classifies characters by the writing system they belong to.

use std::ops::RangeInclusive;

pub const HIRAGANA: RangeInclusive<char> = '\u{3040}'..='\u{309F}';
pub const KATAKANA: RangeInclusive<char> = '\u{30A0}'..='\u{30FF}';
/// Unicode CJK Unified Ideographs
pub const CJK_UNIFIED_IDEOGRAPHS: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Katakana,
    Hiragana,
    Kanji,
    Other,
}

pub fn classify(c: char) -> Script {
    if is_latin(c) {
        Script::Latin
    } else if is_katakana(c) {
        Script::Katakana
    } else if is_hiragana(c) {
        Script::Hiragana
    } else if is_kanji(c) {
        Script::Kanji
    } else {
        Script::Other
    }
}

/// Latin letters are `a` to `z` after folding to lowercase.
pub fn is_latin(c: char) -> bool {
    c.to_ascii_lowercase().is_ascii_lowercase()
}

pub fn is_hiragana(c: char) -> bool {
    HIRAGANA.contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    KATAKANA.contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    CJK_UNIFIED_IDEOGRAPHS.contains(&c)
}

pub fn contains_latin(s: &str) -> bool {
    s.chars().any(is_latin)
}

pub fn contains_katakana(s: &str) -> bool {
    s.chars().any(is_katakana)
}

pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

pub fn is_all_hiragana(s: &str) -> bool {
    s.chars().all(is_hiragana)
}

/// The code points that count as kanji when deciding whether an answer
/// should be replaced by a reading from the kanji table.
///
/// Kept apart from [`is_kanji`] because the upper bound is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeographRange(RangeInclusive<char>);

impl IdeographRange {
    pub const fn new(start: char, end: char) -> Option<Self> {
        if start as u32 > end as u32 {
            return None;
        }
        Some(Self(start..=end))
    }

    pub fn start(&self) -> char {
        *self.0.start()
    }

    pub fn end(&self) -> char {
        *self.0.end()
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// Returns the first character in the range by position in `s`.
    pub fn find_in(&self, s: &str) -> Option<char> {
        s.chars().find(|c| self.contains(*c))
    }
}

impl Default for IdeographRange {
    fn default() -> Self {
        Self(CJK_UNIFIED_IDEOGRAPHS)
    }
}
