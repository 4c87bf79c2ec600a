//! The kanji table together with the settings used to grade answers.

use crate::{
    matching,
    normalize::{self, NormalizeOptions},
    session::{EmptyAttempts, QuizSession},
    table::{KanjiEntry, KanjiTable},
};
use rand::Rng;
use yomi_core::Outcome;

/// A normalized answer and how it fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub normalized: String,
    pub outcome: Outcome,
}

/// Shared, read-only quiz configuration. Per-user state lives in [`QuizSession`].
#[derive(Debug, Clone)]
pub struct Quiz {
    table: KanjiTable,
    options: NormalizeOptions,
    empty_attempts: EmptyAttempts,
}

impl Quiz {
    pub fn new(table: KanjiTable, options: NormalizeOptions, empty_attempts: EmptyAttempts) -> Self {
        Self {
            table,
            options,
            empty_attempts,
        }
    }

    pub fn table(&self) -> &KanjiTable {
        &self.table
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn empty_attempts(&self) -> EmptyAttempts {
        self.empty_attempts
    }

    pub fn romaji_available(&self) -> bool {
        self.options.transliterator.is_enabled()
    }

    pub fn normalize(&self, raw: &str, prompt: &KanjiEntry) -> String {
        normalize::normalize(raw, prompt, &self.table, &self.options)
    }

    pub fn answer(&self, raw: &str, prompt: &KanjiEntry) -> Answer {
        let normalized = self.normalize(raw, prompt);
        let outcome = matching::check(&normalized, prompt);
        Answer {
            normalized,
            outcome,
        }
    }

    pub fn start_session<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizSession {
        QuizSession::start(&self.table, rng)
    }
}
