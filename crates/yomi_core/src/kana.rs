//! Folding between katakana and hiragana.

use std::ops::RangeInclusive;

const UNICODE_KANA_TABLE_DISTANCE: u32 = 'ア' as u32 - 'あ' as u32;
// katakana that have a hiragana counterpart at the fixed distance
const FOLDABLE_KATAKANA: RangeInclusive<char> = '\u{30A1}'..='\u{30F6}';
const FOLDABLE_KATAKANA_MARKS: RangeInclusive<char> = '\u{30FD}'..='\u{30FE}';
const FOLDABLE_HIRAGANA: RangeInclusive<char> = '\u{3041}'..='\u{3096}';
const FOLDABLE_HIRAGANA_MARKS: RangeInclusive<char> = '\u{309D}'..='\u{309E}';

/// Maps a katakana character to its hiragana counterpart.
/// Everything else, including katakana without a counterpart such as `ー`, is returned as is.
pub fn fold_katakana(c: char) -> char {
    if FOLDABLE_KATAKANA.contains(&c) || FOLDABLE_KATAKANA_MARKS.contains(&c) {
        shift(c, |u| u - UNICODE_KANA_TABLE_DISTANCE)
    } else {
        c
    }
}

/// Maps a hiragana character to its katakana counterpart, the inverse of [`fold_katakana`].
pub fn unfold_hiragana(c: char) -> char {
    if FOLDABLE_HIRAGANA.contains(&c) || FOLDABLE_HIRAGANA_MARKS.contains(&c) {
        shift(c, |u| u + UNICODE_KANA_TABLE_DISTANCE)
    } else {
        c
    }
}

pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(fold_katakana).collect()
}

pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars().map(unfold_hiragana).collect()
}

fn shift(c: char, f: impl Fn(u32) -> u32) -> char {
    // the ranges above only contain characters whose shifted counterpart is assigned
    char::from_u32(f(c as u32)).unwrap_or(c)
}
