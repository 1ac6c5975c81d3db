use std::sync::Arc;

use storage::repository::{GameSessionRepository, QuestionRepository};
use trivia_core::model::{Analytics, GameSessionId, GameSessionRecord, NewGameSession};

use crate::Clock;
use crate::error::LeaderboardError;

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

/// Records finished games and serves the leaderboard.
#[derive(Clone)]
pub struct LeaderboardService {
    clock: Clock,
    sessions: Arc<dyn GameSessionRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sessions: Arc<dyn GameSessionRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            clock,
            sessions,
            questions,
        }
    }

    /// Validate a tally and append it to the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Invalid` for a blank name or an impossible tally.
    /// Returns `LeaderboardError::Storage` if persistence fails.
    pub async fn record(
        &self,
        tally: &NewGameSession,
    ) -> Result<GameSessionRecord, LeaderboardError> {
        let record =
            GameSessionRecord::from_tally(GameSessionId::generate(), tally, self.clock.now())?;
        self.sessions.append_session(&record).await?;
        Ok(record)
    }

    /// Highest scores first. `None` means the default of 10; other values are
    /// clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` if repository access fails.
    pub async fn leaderboard(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<GameSessionRecord>, LeaderboardError> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT);
        Ok(self.sessions.top_sessions(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` if repository access fails.
    pub async fn analytics(&self) -> Result<Analytics, LeaderboardError> {
        Ok(Analytics {
            total_questions: self.questions.count_questions().await?,
            total_players: self.sessions.count_sessions().await?,
        })
    }
}
