//! Data-fetch contract used by a game: load questions once, submit the tally once.

use async_trait::async_trait;
use trivia_core::model::{GameSessionRecord, NewGameSession, Question};

use crate::error::ApiError;

mod http;
mod local;

pub use http::{HttpTriviaApi, HttpTriviaConfig};
pub use local::LocalTriviaApi;

#[async_trait]
pub trait TriviaApi: Send + Sync {
    /// Fetch the ordered question list for a new game.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the questions cannot be loaded.
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError>;

    /// Hand a finished game's tally to the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the tally is rejected or cannot be delivered.
    async fn submit_session(&self, tally: &NewGameSession)
    -> Result<GameSessionRecord, ApiError>;
}
