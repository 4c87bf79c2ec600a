//! Conversion of romaji answers into hiragana.

use std::borrow::Cow;
use wana_kana::ConvertJapanese;
use yomi_core::script;

/// Transliterates lowercase Hepburn romaji into hiragana.
///
/// Whether conversion is available at all is decided once on construction.
/// When it is disabled, or when a conversion is incomplete, the input is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transliterator {
    enabled: bool,
}

impl Transliterator {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            tracing::warn!("Romaji conversion is disabled, romaji answers will not be converted");
        }
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn transliterate<'a>(&self, romaji: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(romaji);
        }
        let converted = romaji.to_hiragana();
        accept_conversion(romaji, converted)
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// a conversion that left latin letters behind is not trusted
fn accept_conversion(input: &str, converted: String) -> Cow<'_, str> {
    if script::contains_latin(&converted) {
        tracing::debug!("Failed to fully transliterate '{input}' (got '{converted}'), using it as is");
        Cow::Borrowed(input)
    } else {
        Cow::Owned(converted)
    }
}
