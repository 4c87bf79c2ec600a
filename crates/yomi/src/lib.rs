//! Provides all of yomi's core functionality: grading readings given for kanji.
//!
//! Answers arrive as arbitrary text, which is [normalized](normalize::normalize) into
//! hiragana and then [checked](matching::check) against the accepted readings of the
//! current kanji. Per-user state is kept in a [`QuizSession`].

pub mod matching;
pub mod normalize;
pub mod quiz;
pub mod romaji;
pub mod session;
pub mod table;

pub use matching::check;
pub use normalize::{normalize, NormalizeOptions};
pub use quiz::{Answer, Quiz};
pub use session::{Attempt, EmptyAttempts, Phase, QuizSession};
pub use table::{KanjiEntry, KanjiTable, TableError};
pub use yomi_core::Outcome;
