use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use trivia_core::model::{GameSessionRecord, Question, QuestionId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the question bank.
///
/// Listing order is insertion order.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Fetch questions whose category matches exactly.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Question>, StorageError>;

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Persist a new question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is already taken.
    async fn insert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Replace an existing question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question has this id.
    async fn update_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Delete a question. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError>;

    /// Number of stored questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn count_questions(&self) -> Result<u64, StorageError>;
}

/// Repository contract for finished game sessions (the leaderboard).
#[async_trait]
pub trait GameSessionRepository: Send + Sync {
    /// Append a finished session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is already taken.
    async fn append_session(&self, record: &GameSessionRecord) -> Result<(), StorageError>;

    /// Highest scores first; equal scores keep recording order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn top_sessions(&self, limit: u32) -> Result<Vec<GameSessionRecord>, StorageError>;

    /// Number of recorded sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn count_sessions(&self) -> Result<u64, StorageError>;
}

/// In-memory store for a single process.
///
/// Constructed explicitly and shared by cloning; there is no process-wide
/// instance.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    sessions: Arc<Mutex<Vec<GameSessionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

fn len_u64(len: usize) -> Result<u64, StorageError> {
    u64::try_from(len).map_err(|_| StorageError::Serialization("count overflow".into()))
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(lock(&self.questions)?.clone())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Question>, StorageError> {
        let guard = lock(&self.questions)?;
        Ok(guard
            .iter()
            .filter(|q| q.category() == category)
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = lock(&self.questions)?;
        Ok(guard.iter().find(|q| q.id() == id).cloned())
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = lock(&self.questions)?;
        if guard.iter().any(|q| q.id() == question.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(question.clone());
        Ok(())
    }

    async fn update_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = lock(&self.questions)?;
        let slot = guard
            .iter_mut()
            .find(|q| q.id() == question.id())
            .ok_or(StorageError::NotFound)?;
        *slot = question.clone();
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError> {
        let mut guard = lock(&self.questions)?;
        let before = guard.len();
        guard.retain(|q| q.id() != id);
        Ok(guard.len() != before)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        len_u64(lock(&self.questions)?.len())
    }
}

#[async_trait]
impl GameSessionRepository for InMemoryRepository {
    async fn append_session(&self, record: &GameSessionRecord) -> Result<(), StorageError> {
        let mut guard = lock(&self.sessions)?;
        if guard.iter().any(|s| s.id == record.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(record.clone());
        Ok(())
    }

    async fn top_sessions(&self, limit: u32) -> Result<Vec<GameSessionRecord>, StorageError> {
        let mut sessions = lock(&self.sessions)?.clone();
        // Stable sort keeps recording order for ties.
        sessions.sort_by(|a, b| b.score.cmp(&a.score));
        sessions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(sessions)
    }

    async fn count_sessions(&self) -> Result<u64, StorageError> {
        len_u64(lock(&self.sessions)?.len())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub game_sessions: Arc<dyn GameSessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let game_sessions: Arc<dyn GameSessionRepository> = Arc::new(repo);
        Self {
            questions,
            game_sessions,
        }
    }
}
