//! /session

use super::prelude::*;
use tower_cookies::Cookies;
use yomi::{Phase, QuizSession};

// handlers

#[instrument]
pub async fn current(
    State(state): State<YomiState>,
    current: CurrentSession,
) -> Json<res::Session> {
    let session = current.session.lock().await;
    Json(to_response(&state, &session))
}

#[instrument(skip(cookies))]
pub async fn end(State(state): State<YomiState>, cookies: Cookies) -> StatusCode {
    let signed_cookies = cookies.signed(&state.private_cookie_key);
    crate::session::forget_session(&signed_cookies, &state.sessions).await;
    StatusCode::NO_CONTENT
}

#[instrument]
pub async fn next(State(state): State<YomiState>, current: CurrentSession) -> Json<res::Session> {
    let mut session = current.session.lock().await;
    session.next_prompt(state.quiz.table(), &mut rand::rng());
    Json(to_response(&state, &session))
}

#[instrument]
pub async fn transcript(
    State(state): State<YomiState>,
    current: CurrentSession,
    Json(transcript): Json<req::Transcript>,
) -> Json<res::Session> {
    let mut session = current.session.lock().await;
    session.capture(&transcript.text);
    Json(to_response(&state, &session))
}

#[instrument]
pub async fn check(
    State(state): State<YomiState>,
    current: CurrentSession,
    Json(check): Json<req::Check>,
) -> Json<res::CheckResult> {
    let mut session = current.session.lock().await;
    let typed = check.answer.as_deref().unwrap_or_default();
    let answer = session.submit(&state.quiz, typed);
    let prompt = session.prompt();
    Json(res::CheckResult {
        kanji: prompt.character(),
        normalized: answer.normalized,
        outcome: answer.outcome,
        accepted_readings: prompt.readings().to_vec(),
    })
}

#[instrument]
pub async fn reading(current: CurrentSession) -> Json<res::Reading> {
    let session = current.session.lock().await;
    let prompt = session.prompt();
    Json(res::Reading {
        kanji: prompt.character(),
        reading: prompt.canonical_reading().to_string(),
    })
}

#[instrument]
pub async fn history(
    State(state): State<YomiState>,
    current: CurrentSession,
    Query(query): Query<req::History>,
) -> Json<Vec<res::Attempt>> {
    let limit = query
        .limit
        .unwrap_or(state.history_limit)
        .min(state.history_limit);
    let session = current.session.lock().await;
    let attempts = session
        .recent(limit)
        .map(|attempt| res::Attempt {
            kanji: attempt.kanji,
            answer: attempt.answer.clone(),
            outcome: attempt.outcome,
        })
        .collect();
    Json(attempts)
}

// utils

fn to_response(state: &YomiState, session: &QuizSession) -> res::Session {
    let phase = match session.phase() {
        Phase::AwaitingInput => res::Phase::AwaitingInput,
        Phase::Checked(outcome) => res::Phase::Checked(outcome),
    };
    res::Session {
        kanji: session.prompt().character(),
        phase,
        last_transcript: session.last_transcript().map(str::to_string),
        romaji_available: state.quiz.romaji_available(),
    }
}
