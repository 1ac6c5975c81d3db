use thiserror::Error;

use crate::model::{ParseChoiceError, QuestionError, TallyError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Tally(#[from] TallyError),
    #[error(transparent)]
    Choice(#[from] ParseChoiceError),
}
