#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod game;
pub mod leaderboard_service;
pub mod question_service;

pub use trivia_core::Clock;

pub use api::{HttpTriviaApi, HttpTriviaConfig, LocalTriviaApi, TriviaApi};
pub use error::{ApiError, GameError, GameRunError, LeaderboardError, QuestionServiceError};
pub use game::{
    GameDriver, GameEvent, GameExit, GameObserver, GameReport, GameSettings, Phase, PlayerInput,
    SubmissionOutcome, TriviaSession,
};
pub use leaderboard_service::LeaderboardService;
pub use question_service::QuestionService;
