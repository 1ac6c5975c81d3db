//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use trivia_core::model::{QuestionError, QuestionId, TallyError};

use crate::game::Phase;

/// Errors emitted by `TriviaSession` transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("no questions available for a game")]
    NoQuestions,
    #[error("player name is required to start")]
    EmptyPlayerName,
    #[error("no answer selected")]
    NoSelection,
    #[error("action requires phase {expected}, session is {actual}")]
    WrongPhase { expected: Phase, actual: Phase },
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error("question {0} not found")]
    NotFound(QuestionId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Invalid(#[from] TallyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TriviaApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("trivia api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error(transparent)]
    Questions(#[from] QuestionServiceError),
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
}

/// Errors that stop a `GameDriver` run before a game can be played.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameRunError {
    #[error("failed to load questions: {0}")]
    Fetch(#[source] ApiError),
    #[error(transparent)]
    Game(#[from] GameError),
}
