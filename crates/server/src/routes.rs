use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use trivia_core::model::{
    Analytics, GameSessionRecord, NewGameSession, Question, QuestionDraft, QuestionId,
    QuestionPatch,
};

use crate::error::ApiFailure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

fn question_id(path: Result<Path<String>, PathRejection>) -> Result<QuestionId, ApiFailure> {
    let Path(raw) = path?;
    raw.parse()
        .map_err(|_| ApiFailure::BadRequest(format!("invalid question id: {raw}")))
}

pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Question>>, ApiFailure> {
    let Query(query) = query?;
    let questions = state.questions.list(query.category.as_deref()).await?;
    Ok(Json(questions))
}

pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiFailure> {
    let Json(draft) = payload?;
    let question = state.questions.create(draft).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn update_question(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<QuestionPatch>, JsonRejection>,
) -> Result<Json<Question>, ApiFailure> {
    let id = question_id(path)?;
    let Json(patch) = payload?;
    let question = state.questions.update(id, patch).await?;
    Ok(Json(question))
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiFailure> {
    let id = question_id(path)?;
    state.questions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_game_session(
    State(state): State<AppState>,
    payload: Result<Json<NewGameSession>, JsonRejection>,
) -> Result<(StatusCode, Json<GameSessionRecord>), ApiFailure> {
    let Json(tally) = payload?;
    let record = state.leaderboard.record(&tally).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Vec<GameSessionRecord>>, ApiFailure> {
    let Query(query) = query?;
    let entries = state.leaderboard.leaderboard(query.limit).await?;
    Ok(Json(entries))
}

pub async fn analytics(State(state): State<AppState>) -> Result<Json<Analytics>, ApiFailure> {
    Ok(Json(state.leaderboard.analytics().await?))
}
