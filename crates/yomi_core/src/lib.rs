//! yomi core types and functions.

pub mod kana;
pub mod script;

use serde::{Deserialize, Serialize};

/// The result of checking a normalized answer against a kanji's accepted readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Nothing usable was given as an answer.
    Empty,
}
