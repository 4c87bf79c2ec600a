//! Types for responses from the server to clients.

use serde::{Deserialize, Serialize};
pub use yomi_core::Outcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanjiList {
    pub kanji: Vec<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "outcome")]
pub enum Phase {
    AwaitingInput,
    Checked(Outcome),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub kanji: char,
    pub phase: Phase,
    pub last_transcript: Option<String>,
    /// Whether romaji answers are converted to kana.
    pub romaji_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub kanji: char,
    pub normalized: String,
    pub outcome: Outcome,
    pub accepted_readings: Vec<String>,
}

/// The reading to play back for the current kanji.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub kanji: char,
    pub reading: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub kanji: char,
    pub answer: String,
    pub outcome: Outcome,
}
