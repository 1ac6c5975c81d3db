use services::{Clock, LeaderboardService, QuestionService};
use storage::Storage;
use storage::seed::seed_default_questions;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::StartupError;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionService,
    pub leaderboard: LeaderboardService,
}

impl AppState {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage) -> Self {
        Self {
            questions: QuestionService::new(clock, storage.questions.clone()),
            leaderboard: LeaderboardService::new(
                clock,
                storage.game_sessions.clone(),
                storage.questions.clone(),
            ),
        }
    }

    /// Open the configured store, seed it if asked, and build the state.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if the store cannot be opened or seeded.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let storage = match &config.db_url {
            Some(url) => {
                info!("Opening SQLite store");
                Storage::sqlite(url).await?
            }
            None => Storage::in_memory(),
        };

        let clock = Clock::system();
        if config.seed {
            seed_default_questions(storage.questions.as_ref(), &clock).await?;
        }

        Ok(Self::new(clock, &storage))
    }
}
