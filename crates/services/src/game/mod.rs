mod countdown;
mod driver;
mod feedback;
mod session;
mod timer;

// Public API of the game subsystem.
pub use crate::error::{GameError, GameRunError};
pub use countdown::{Countdown, CountdownTick};
pub use driver::{
    GameDriver, GameEvent, GameExit, GameObserver, GameReport, PlayerInput, SubmissionOutcome,
};
pub use feedback::{CORRECT_DETAIL, CORRECT_TITLE, Feedback, FeedbackPicker, ROASTS};
pub use session::{
    Advance, AnsweredQuestion, GameProgress, GameSettings, LastResult, Phase, SubmitCause,
    TickOutcome, TriviaSession,
};
pub use timer::TickTimer;
