use std::fmt;
use std::time::Duration;

use trivia_core::model::{AnswerChoice, NewGameSession, Question, QuestionId};
use trivia_core::scoring;

use super::countdown::{Countdown, CountdownTick};
use crate::error::GameError;

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing knobs for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Countdown budget per question, in seconds.
    pub question_seconds: u32,
    /// How long a result stays on screen before the game moves on.
    pub result_delay: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            question_seconds: 45,
            result_delay: Duration::from_secs(2),
        }
    }
}

//
// ─── PHASE & RESULTS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    ShowingResult,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::InProgress => "in-progress",
            Phase::ShowingResult => "showing-result",
            Phase::Complete => "complete",
        })
    }
}

/// What moved the session out of `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitCause {
    Answered,
    Skipped,
    TimedOut,
}

/// Outcome of the most recent submission; present only while the result is
/// on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResult {
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub selected: Option<AnswerChoice>,
    pub correct_answer: AnswerChoice,
    pub correct_answer_text: String,
    pub points: u32,
    pub cause: SubmitCause,
}

/// One entry of the answer history. `selected` is `None` for blank submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question_id: QuestionId,
    pub selected: Option<AnswerChoice>,
    pub is_correct: bool,
}

/// Result of feeding one second to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in progress, or the countdown is not running.
    Ignored,
    Running { remaining: u32 },
    /// Time ran out and the current selection was submitted.
    Expired,
}

/// What happens when the result display ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next,
    /// The game is over; this tally is handed off exactly once.
    Complete(NewGameSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameProgress {
    pub index: usize,
    pub total: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Single-player trivia game over a fixed question list.
///
/// Phases run `Setup → InProgress → ShowingResult → InProgress … → Complete`.
/// Every transition checks the phase first, so a late timer expiry after a
/// manual submit (or the reverse) is rejected instead of scored twice.
///
/// The index advances when an answer is recorded, which keeps
/// `correct_count <= index` and `score == 100 * correct_count` at all times.
#[derive(Clone)]
pub struct TriviaSession {
    questions: Vec<Question>,
    settings: GameSettings,
    phase: Phase,
    player_name: Option<String>,
    index: usize,
    score: u32,
    correct: u32,
    history: Vec<AnsweredQuestion>,
    countdown: Countdown,
    selected: Option<AnswerChoice>,
    last_result: Option<LastResult>,
}

impl TriviaSession {
    /// Build a session in `Setup`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoQuestions` if the list is empty.
    pub fn new(questions: Vec<Question>, settings: GameSettings) -> Result<Self, GameError> {
        if questions.is_empty() {
            return Err(GameError::NoQuestions);
        }
        Ok(Self {
            questions,
            settings,
            phase: Phase::Setup,
            player_name: None,
            index: 0,
            score: 0,
            correct: 0,
            history: Vec::new(),
            countdown: Countdown::new(settings.question_seconds),
            selected: None,
            last_result: None,
        })
    }

    /// A fresh session over the same questions, back in `Setup`.
    #[must_use]
    pub fn replay(&self) -> Self {
        Self {
            questions: self.questions.clone(),
            settings: self.settings,
            phase: Phase::Setup,
            player_name: None,
            index: 0,
            score: 0,
            correct: 0,
            history: Vec::new(),
            countdown: Countdown::new(self.settings.question_seconds),
            selected: None,
            last_result: None,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Enter `InProgress` with the first question and a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyPlayerName` for a blank name (the phase stays
    /// `Setup`), or `GameError::WrongPhase` outside `Setup`.
    pub fn start(&mut self, player_name: &str) -> Result<&Question, GameError> {
        self.expect_phase(Phase::Setup)?;
        let name = player_name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        self.player_name = Some(name.to_owned());
        self.phase = Phase::InProgress;
        self.countdown.arm();
        Ok(&self.questions[self.index])
    }

    /// Choose an answer for the current question. Replaces any prior choice.
    ///
    /// # Errors
    ///
    /// Returns `GameError::WrongPhase` outside `InProgress`.
    pub fn select(&mut self, choice: AnswerChoice) -> Result<(), GameError> {
        self.expect_phase(Phase::InProgress)?;
        self.selected = Some(choice);
        Ok(())
    }

    /// Submit the current selection.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoSelection` if nothing is selected, or
    /// `GameError::WrongPhase` outside `InProgress`.
    pub fn submit(&mut self) -> Result<&LastResult, GameError> {
        self.expect_phase(Phase::InProgress)?;
        let selected = self.selected.ok_or(GameError::NoSelection)?;
        Ok(self.record(Some(selected), SubmitCause::Answered))
    }

    /// Submit a blank answer, scored as wrong.
    ///
    /// # Errors
    ///
    /// Returns `GameError::WrongPhase` outside `InProgress`.
    pub fn skip(&mut self) -> Result<&LastResult, GameError> {
        self.expect_phase(Phase::InProgress)?;
        Ok(self.record(None, SubmitCause::Skipped))
    }

    /// Advance the countdown by one second.
    ///
    /// On expiry the current selection (possibly none) is submitted.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::InProgress {
            return TickOutcome::Ignored;
        }
        match self.countdown.tick() {
            CountdownTick::Idle => TickOutcome::Ignored,
            CountdownTick::Running(remaining) => TickOutcome::Running { remaining },
            CountdownTick::Expired => {
                self.record(self.selected, SubmitCause::TimedOut);
                TickOutcome::Expired
            }
        }
    }

    fn record(&mut self, selected: Option<AnswerChoice>, cause: SubmitCause) -> &LastResult {
        let question = &self.questions[self.index];
        let outcome = scoring::score(question, selected);

        self.history.push(AnsweredQuestion {
            question_id: question.id(),
            selected,
            is_correct: outcome.is_correct,
        });
        let result = LastResult {
            question_id: question.id(),
            is_correct: outcome.is_correct,
            selected,
            correct_answer: question.correct_answer(),
            correct_answer_text: question.correct_answer_text().to_owned(),
            points: outcome.points,
            cause,
        };

        if outcome.is_correct {
            self.correct += 1;
            self.score += outcome.points;
        }
        self.index += 1;
        self.countdown.disarm();
        self.phase = Phase::ShowingResult;
        self.last_result.insert(result)
    }

    /// End the result display: move to the next question or complete.
    ///
    /// # Errors
    ///
    /// Returns `GameError::WrongPhase` outside `ShowingResult`.
    pub fn finish_result(&mut self) -> Result<Advance, GameError> {
        self.expect_phase(Phase::ShowingResult)?;
        self.last_result = None;
        self.selected = None;

        if self.index >= self.questions.len() {
            self.phase = Phase::Complete;
            return Ok(Advance::Complete(self.build_tally()));
        }

        self.phase = Phase::InProgress;
        self.countdown.arm();
        Ok(Advance::Next)
    }

    fn build_tally(&self) -> NewGameSession {
        NewGameSession {
            player_name: self.player_name.clone().unwrap_or_default(),
            score: self.score,
            correct_answers: self.correct,
            total_questions: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
        }
    }

    /// The final tally; `None` until the game is complete.
    #[must_use]
    pub fn tally(&self) -> Option<NewGameSession> {
        (self.phase == Phase::Complete).then(|| self.build_tally())
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    /// The question being asked; `None` once all have been answered.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    #[must_use]
    pub fn progress(&self) -> GameProgress {
        GameProgress {
            index: self.index,
            total: self.questions.len(),
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Answered questions that were not correct (skips and timeouts included).
    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.history.len() - self.history.iter().filter(|a| a.is_correct).count()
    }

    #[must_use]
    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn selected(&self) -> Option<AnswerChoice> {
        self.selected
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&LastResult> {
        self.last_result.as_ref()
    }
}

impl fmt::Debug for TriviaSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriviaSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("index", &self.index)
            .field("score", &self.score)
            .field("correct", &self.correct)
            .field("time_remaining", &self.countdown.remaining())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
