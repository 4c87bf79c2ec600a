//! The table of kanji that can be quizzed on and their accepted readings.

use rand::Rng;
use serde::Deserialize;
use std::{collections::HashMap, io::Read};
use thiserror::Error;
use yomi_core::script;

/// The table used when no other table is configured.
const BUILTIN_TABLE: &str = include_str!("../../../data/kanji.json");

#[derive(Debug, Error)]
pub enum TableError {
    #[error("The kanji table has no entries")]
    Empty,
    #[error("Expected a single kanji, found '{0}'")]
    NotSingleKanji(String),
    #[error("'{0}' appears more than once in the kanji table")]
    Duplicate(char),
    #[error("'{0}' has no accepted readings")]
    NoReadings(char),
    #[error("The reading '{reading}' of '{kanji}' is not written in hiragana")]
    NotHiragana { kanji: char, reading: String },
    #[error("Failed to parse the kanji table")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read the kanji table")]
    Io(#[from] std::io::Error),
}

/// A single kanji that can be quizzed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiEntry {
    character: char,
    /// Never empty, the first reading is the canonical one.
    readings: Vec<String>,
}

impl KanjiEntry {
    pub fn new(character: char, readings: Vec<String>) -> Result<Self, TableError> {
        if !script::is_kanji(character) {
            return Err(TableError::NotSingleKanji(character.to_string()));
        }
        if readings.is_empty() {
            return Err(TableError::NoReadings(character));
        }
        if let Some(reading) = readings
            .iter()
            .find(|r| r.is_empty() || !script::is_all_hiragana(r))
        {
            return Err(TableError::NotHiragana {
                kanji: character,
                reading: reading.clone(),
            });
        }
        Ok(Self {
            character,
            readings,
        })
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn readings(&self) -> &[String] {
        &self.readings
    }

    /// The reading used for display and playback.
    pub fn canonical_reading(&self) -> &str {
        self.readings.first().map(String::as_str).unwrap_or_default()
    }

    pub fn accepts(&self, answer: &str) -> bool {
        self.readings.iter().any(|r| r == answer)
    }
}

#[derive(Debug, Deserialize)]
struct TableFileEntry {
    kanji: String,
    readings: Vec<String>,
}

/// The static kanji table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct KanjiTable {
    entries: Vec<KanjiEntry>,
    index: HashMap<char, usize>,
}

impl KanjiTable {
    pub fn new(entries: Vec<KanjiEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        let mut index = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if index.insert(entry.character, idx).is_some() {
                return Err(TableError::Duplicate(entry.character));
            }
        }
        Ok(Self { entries, index })
    }

    pub fn builtin() -> Result<Self, TableError> {
        Self::from_json(BUILTIN_TABLE)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let file_entries: Vec<TableFileEntry> = serde_json::from_str(json)?;
        Self::from_file_entries(file_entries)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, TableError> {
        let file_entries: Vec<TableFileEntry> = serde_json::from_reader(reader)?;
        Self::from_file_entries(file_entries)
    }

    fn from_file_entries(file_entries: Vec<TableFileEntry>) -> Result<Self, TableError> {
        let entries = file_entries
            .into_iter()
            .map(|fe| {
                let mut chars = fe.kanji.chars();
                match (chars.next(), chars.next()) {
                    (Some(character), None) => KanjiEntry::new(character, fe.readings),
                    _ => Err(TableError::NotSingleKanji(fe.kanji)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self::new(entries)?;
        tracing::info!("Loaded a kanji table with {} entries", table.len());
        Ok(table)
    }

    pub fn get(&self, character: char) -> Option<&KanjiEntry> {
        self.index.get(&character).map(|idx| &self.entries[*idx])
    }

    /// Returns the canonical reading of the given kanji if it is in the table.
    pub fn resolve(&self, character: char) -> Option<&str> {
        self.get(character).map(KanjiEntry::canonical_reading)
    }

    pub fn entries(&self) -> &[KanjiEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks an entry uniformly at random. Consecutive picks are independent.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &KanjiEntry {
        // the table is never empty
        let idx = rng.random_range(0..self.entries.len());
        &self.entries[idx]
    }
}
