use sqlx::Row;
use trivia_core::model::{
    AnswerChoice, Difficulty, GameSessionId, GameSessionRecord, Question, QuestionDraft,
    QuestionId,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Unique-constraint violations become `Conflict`; everything else is a
/// connection error.
pub(crate) fn insert_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => conn(e),
    }
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn u64_from_i64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let id: QuestionId = row
        .try_get::<String, _>("id")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let correct_answer: AnswerChoice = row
        .try_get::<String, _>("correct_answer")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let difficulty: Difficulty = row
        .try_get::<String, _>("difficulty")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    let draft = QuestionDraft {
        category: row.try_get("category").map_err(ser)?,
        text: row.try_get("text").map_err(ser)?,
        option_a: row.try_get("option_a").map_err(ser)?,
        option_b: row.try_get("option_b").map_err(ser)?,
        option_c: row.try_get("option_c").map_err(ser)?,
        option_d: row.try_get("option_d").map_err(ser)?,
        correct_answer,
        difficulty: Some(difficulty),
    };

    Question::from_draft(id, draft, row.try_get("created_at").map_err(ser)?).map_err(ser)
}

pub(crate) fn map_session_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<GameSessionRecord, StorageError> {
    let id: GameSessionId = row
        .try_get::<String, _>("id")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    Ok(GameSessionRecord {
        id,
        player_name: row.try_get("player_name").map_err(ser)?,
        score: u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?,
        correct_answers: u32_from_i64(
            "correct_answers",
            row.try_get::<i64, _>("correct_answers").map_err(ser)?,
        )?,
        total_questions: u32_from_i64(
            "total_questions",
            row.try_get::<i64, _>("total_questions").map_err(ser)?,
        )?,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}
