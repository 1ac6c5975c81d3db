mod choice;
mod ids;
mod question;
mod session;

pub use ids::{GameSessionId, ParseIdError, QuestionId};

pub use choice::{AnswerChoice, Difficulty, ParseChoiceError};
pub use question::{Question, QuestionDraft, QuestionError, QuestionPatch};
pub use session::{Analytics, GameSessionRecord, NewGameSession, TallyError};
