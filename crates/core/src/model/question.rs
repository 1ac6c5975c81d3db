use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::choice::{AnswerChoice, Difficulty};
use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {0} cannot be empty")]
    EmptyOption(AnswerChoice),
}

impl QuestionError {
    /// Name of the offending field in the wire shape.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyCategory => "category",
            Self::EmptyText => "text",
            Self::EmptyOption(AnswerChoice::A) => "optionA",
            Self::EmptyOption(AnswerChoice::B) => "optionB",
            Self::EmptyOption(AnswerChoice::C) => "optionC",
            Self::EmptyOption(AnswerChoice::D) => "optionD",
        }
    }
}

fn required(value: &str, err: QuestionError) -> Result<String, QuestionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_owned())
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A four-option trivia question.
///
/// Immutable once handed to a game session; edits go through
/// [`Question::apply_patch`], which produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    category: String,
    text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: AnswerChoice,
    difficulty: Difficulty,
    created_at: DateTime<Utc>,
}

impl Question {
    /// Build a question from a validated draft.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the draft has empty fields.
    pub fn from_draft(
        id: QuestionId,
        draft: QuestionDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuestionError> {
        Ok(Self {
            id,
            category: required(&draft.category, QuestionError::EmptyCategory)?,
            text: required(&draft.text, QuestionError::EmptyText)?,
            option_a: required(&draft.option_a, QuestionError::EmptyOption(AnswerChoice::A))?,
            option_b: required(&draft.option_b, QuestionError::EmptyOption(AnswerChoice::B))?,
            option_c: required(&draft.option_c, QuestionError::EmptyOption(AnswerChoice::C))?,
            option_d: required(&draft.option_d, QuestionError::EmptyOption(AnswerChoice::D))?,
            correct_answer: draft.correct_answer,
            difficulty: draft.difficulty.unwrap_or_default(),
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of the given option slot.
    #[must_use]
    pub fn option(&self, choice: AnswerChoice) -> &str {
        match choice {
            AnswerChoice::A => &self.option_a,
            AnswerChoice::B => &self.option_b,
            AnswerChoice::C => &self.option_c,
            AnswerChoice::D => &self.option_d,
        }
    }

    /// All four options in display order.
    pub fn options(&self) -> impl Iterator<Item = (AnswerChoice, &str)> {
        AnswerChoice::ALL
            .into_iter()
            .map(move |choice| (choice, self.option(choice)))
    }

    #[must_use]
    pub fn correct_answer(&self) -> AnswerChoice {
        self.correct_answer
    }

    #[must_use]
    pub fn correct_answer_text(&self) -> &str {
        self.option(self.correct_answer)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Convert back into the insert shape (used by storage adapters).
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            category: self.category.clone(),
            text: self.text.clone(),
            option_a: self.option_a.clone(),
            option_b: self.option_b.clone(),
            option_c: self.option_c.clone(),
            option_d: self.option_d.clone(),
            correct_answer: self.correct_answer,
            difficulty: Some(self.difficulty),
        }
    }

    /// Merge a partial update into a copy of this question.
    ///
    /// Each field is merged by name; id and creation time never change.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the merged question fails validation.
    pub fn apply_patch(&self, patch: QuestionPatch) -> Result<Self, QuestionError> {
        let QuestionPatch {
            category,
            text,
            option_a,
            option_b,
            option_c,
            option_d,
            correct_answer,
            difficulty,
        } = patch;

        let mut draft = self.to_draft();
        if let Some(category) = category {
            draft.category = category;
        }
        if let Some(text) = text {
            draft.text = text;
        }
        if let Some(option_a) = option_a {
            draft.option_a = option_a;
        }
        if let Some(option_b) = option_b {
            draft.option_b = option_b;
        }
        if let Some(option_c) = option_c {
            draft.option_c = option_c;
        }
        if let Some(option_d) = option_d {
            draft.option_d = option_d;
        }
        if let Some(correct_answer) = correct_answer {
            draft.correct_answer = correct_answer;
        }
        if let Some(difficulty) = difficulty {
            draft.difficulty = Some(difficulty);
        }

        Self::from_draft(self.id, draft, self.created_at)
    }
}

//
// ─── INSERT / UPDATE SHAPES ────────────────────────────────────────────────────
//

/// Insert shape for a new question. `difficulty` defaults to medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionDraft {
    pub category: String,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: AnswerChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl QuestionDraft {
    /// Check the draft without building a question.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found, in field order.
    pub fn validate(&self) -> Result<(), QuestionError> {
        required(&self.category, QuestionError::EmptyCategory)?;
        required(&self.text, QuestionError::EmptyText)?;
        for choice in AnswerChoice::ALL {
            required(self.option(choice), QuestionError::EmptyOption(choice))?;
        }
        Ok(())
    }

    fn option(&self, choice: AnswerChoice) -> &str {
        match choice {
            AnswerChoice::A => &self.option_a,
            AnswerChoice::B => &self.option_b,
            AnswerChoice::C => &self.option_c,
            AnswerChoice::D => &self.option_d,
        }
    }
}

/// Partial update for a question. Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<AnswerChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl QuestionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
