//! Per-user quiz state.

use crate::{
    quiz::{Answer, Quiz},
    table::{KanjiEntry, KanjiTable},
};
use rand::Rng;
use yomi_core::Outcome;

/// What to do with attempts where no usable answer was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyAttempts {
    /// Report the empty outcome without recording it.
    #[default]
    Skip,
    /// Record the attempt in the history with the empty outcome.
    Record,
}

/// Where the current prompt is in its lifecycle.
/// A session always has a prompt, so it starts out awaiting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    Checked(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub kanji: char,
    pub answer: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    prompt: KanjiEntry,
    phase: Phase,
    last_transcript: Option<String>,
    /// Only ever appended to.
    history: Vec<Attempt>,
}

impl QuizSession {
    /// Starts a session with a random prompt from the table.
    pub fn start<R: Rng + ?Sized>(table: &KanjiTable, rng: &mut R) -> Self {
        Self::with_prompt(table.choose(rng).clone())
    }

    pub fn with_prompt(prompt: KanjiEntry) -> Self {
        Self {
            prompt,
            phase: Phase::AwaitingInput,
            last_transcript: None,
            history: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &KanjiEntry {
        &self.prompt
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// The `limit` most recent attempts, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Attempt> {
        self.history.iter().rev().take(limit)
    }

    /// Replaces the prompt with a new random one. The same prompt may be drawn again.
    pub fn next_prompt<R: Rng + ?Sized>(&mut self, table: &KanjiTable, rng: &mut R) -> &KanjiEntry {
        self.prompt = table.choose(rng).clone();
        self.phase = Phase::AwaitingInput;
        self.last_transcript = None;
        tracing::debug!("New prompt {}", self.prompt.character());
        &self.prompt
    }

    /// Stores a captured transcript, replacing any previous one. Blank transcripts are ignored.
    pub fn capture(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if !transcript.is_empty() {
            self.last_transcript = Some(transcript.to_string());
        }
    }

    /// The raw answer to check: the captured transcript if there is one, the typed answer otherwise.
    pub fn candidate<'a>(&'a self, typed: &'a str) -> &'a str {
        match self.last_transcript.as_deref() {
            Some(transcript) => transcript,
            None => typed.trim(),
        }
    }

    /// Checks the candidate answer against the current prompt and records the attempt.
    /// The prompt does not change.
    pub fn submit(&mut self, quiz: &Quiz, typed: &str) -> Answer {
        let answer = quiz.answer(self.candidate(typed), &self.prompt);
        self.phase = Phase::Checked(answer.outcome);
        if answer.outcome != Outcome::Empty || quiz.empty_attempts() == EmptyAttempts::Record {
            self.history.push(Attempt {
                kanji: self.prompt.character(),
                answer: answer.normalized.clone(),
                outcome: answer.outcome,
            });
        }
        tracing::debug!(
            "Answered {} with '{}': {:?}",
            self.prompt.character(),
            answer.normalized,
            answer.outcome
        );
        answer
    }
}
