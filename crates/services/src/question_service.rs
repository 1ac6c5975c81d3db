use std::sync::Arc;

use storage::repository::{QuestionRepository, StorageError};
use trivia_core::model::{Question, QuestionDraft, QuestionId, QuestionPatch};

use crate::Clock;
use crate::error::QuestionServiceError;

/// Admin operations on the question bank.
#[derive(Clone)]
pub struct QuestionService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// List questions in insertion order, optionally restricted to one category.
    ///
    /// A blank category filter lists everything.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Question>, QuestionServiceError> {
        let questions = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => self.questions.list_by_category(category).await?,
            None => self.questions.list_questions().await?,
        };
        Ok(questions)
    }

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if no question has this id.
    pub async fn get(&self, id: QuestionId) -> Result<Question, QuestionServiceError> {
        self.questions
            .get_question(id)
            .await?
            .ok_or(QuestionServiceError::NotFound(id))
    }

    /// Validate a draft and persist it as a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Invalid` for validation failures.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn create(&self, draft: QuestionDraft) -> Result<Question, QuestionServiceError> {
        let question = Question::from_draft(QuestionId::generate(), draft, self.clock.now())?;
        self.questions.insert_question(&question).await?;
        Ok(question)
    }

    /// Merge a partial update into an existing question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if no question has this id.
    /// Returns `QuestionServiceError::Invalid` if the merged question is invalid.
    pub async fn update(
        &self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, QuestionServiceError> {
        let current = self.get(id).await?;
        let updated = current.apply_patch(patch)?;
        self.questions
            .update_question(&updated)
            .await
            .map_err(|err| match err {
                StorageError::NotFound => QuestionServiceError::NotFound(id),
                other => other.into(),
            })?;
        Ok(updated)
    }

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if no question has this id.
    pub async fn delete(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        if self.questions.delete_question(id).await? {
            Ok(())
        } else {
            Err(QuestionServiceError::NotFound(id))
        }
    }
}
