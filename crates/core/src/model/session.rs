use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GameSessionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    #[error("player name cannot be empty")]
    EmptyPlayerName,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

impl TallyError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPlayerName => "playerName",
            Self::CorrectExceedsTotal { .. } => "correctAnswers",
        }
    }
}

/// Final tally of one finished game, as handed to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewGameSession {
    pub player_name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub total_questions: u32,
}

impl NewGameSession {
    /// Check the tally before it is recorded.
    ///
    /// # Errors
    ///
    /// Returns `TallyError` for a blank name or an impossible correct count.
    pub fn validate(&self) -> Result<(), TallyError> {
        if self.player_name.trim().is_empty() {
            return Err(TallyError::EmptyPlayerName);
        }
        if self.correct_answers > self.total_questions {
            return Err(TallyError::CorrectExceedsTotal {
                correct: self.correct_answers,
                total: self.total_questions,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn wrong_answers(&self) -> u32 {
        self.total_questions.saturating_sub(self.correct_answers)
    }
}

/// A recorded leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionRecord {
    pub id: GameSessionId,
    pub player_name: String,
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
}

impl GameSessionRecord {
    /// Stamp a validated tally with an id and completion time.
    ///
    /// # Errors
    ///
    /// Returns `TallyError` if the tally is invalid.
    pub fn from_tally(
        id: GameSessionId,
        tally: &NewGameSession,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, TallyError> {
        tally.validate()?;
        Ok(Self {
            id,
            player_name: tally.player_name.trim().to_owned(),
            score: tally.score,
            correct_answers: tally.correct_answers,
            total_questions: tally.total_questions,
            completed_at,
        })
    }
}

/// Aggregate counters shown next to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_questions: u64,
    pub total_players: u64,
}
