use async_trait::async_trait;
use storage::repository::Storage;
use trivia_core::model::{GameSessionRecord, NewGameSession, Question};

use super::TriviaApi;
use crate::Clock;
use crate::error::ApiError;
use crate::leaderboard_service::LeaderboardService;
use crate::question_service::QuestionService;

/// In-process `TriviaApi` backed directly by the services.
#[derive(Clone)]
pub struct LocalTriviaApi {
    questions: QuestionService,
    leaderboard: LeaderboardService,
}

impl LocalTriviaApi {
    #[must_use]
    pub fn new(questions: QuestionService, leaderboard: LeaderboardService) -> Self {
        Self {
            questions,
            leaderboard,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            QuestionService::new(clock, storage.questions.clone()),
            LeaderboardService::new(
                clock,
                storage.game_sessions.clone(),
                storage.questions.clone(),
            ),
        )
    }
}

#[async_trait]
impl TriviaApi for LocalTriviaApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        Ok(self.questions.list(None).await?)
    }

    async fn submit_session(
        &self,
        tally: &NewGameSession,
    ) -> Result<GameSessionRecord, ApiError> {
        Ok(self.leaderboard.record(tally).await?)
    }
}
