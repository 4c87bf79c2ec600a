//! /kanji

use super::prelude::*;

// handlers

#[instrument]
pub async fn list(State(state): State<YomiState>) -> Json<res::KanjiList> {
    let kanji = state
        .quiz
        .table()
        .entries()
        .iter()
        .map(|entry| entry.character())
        .collect();
    Json(res::KanjiList { kanji })
}

#[instrument]
pub async fn reading(
    State(state): State<YomiState>,
    Path(kanji): Path<String>,
) -> YomiResult<Json<res::Reading>> {
    let mut chars = kanji.chars();
    let character = match (chars.next(), chars.next()) {
        (Some(character), None) => character,
        _ => {
            return Err(YomiError::new(
                StatusCode::BAD_REQUEST,
                format!("Expected a single kanji, got '{kanji}'"),
            ))
        }
    };
    let reading = state.quiz.table().resolve(character).ok_or_else(|| {
        YomiError::new(
            StatusCode::NOT_FOUND,
            format!("No reading known for '{character}'"),
        )
    })?;
    Ok(Json(res::Reading {
        kanji: character,
        reading: reading.to_string(),
    }))
}
