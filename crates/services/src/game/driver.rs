use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use trivia_core::model::{AnswerChoice, GameSessionRecord, NewGameSession, Question};

use super::feedback::{Feedback, FeedbackPicker};
use super::session::{
    Advance, GameProgress, GameSettings, LastResult, Phase, TickOutcome, TriviaSession,
};
use super::timer::TickTimer;
use crate::api::TriviaApi;
use crate::error::{GameError, GameRunError};

const TICK_PERIOD: Duration = Duration::from_secs(1);

//
// ─── INPUTS & EVENTS ───────────────────────────────────────────────────────────
//

/// Player actions fed to the driver. A closed channel counts as `Quit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    Start(String),
    Select(AnswerChoice),
    Submit,
    Skip,
    Quit,
}

/// Everything a front end needs to render the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    NameRejected(GameError),
    QuestionShown {
        question: Question,
        progress: GameProgress,
        time_remaining: u32,
    },
    Tick {
        remaining: u32,
    },
    AnswerSelected(AnswerChoice),
    InputRejected(GameError),
    ResultShown {
        result: LastResult,
        feedback: Feedback,
    },
    Completed(NewGameSession),
    SubmissionSaved(GameSessionRecord),
    SubmissionFailed(String),
}

/// Receives game events. Rendering problems stay inside the observer.
pub trait GameObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl GameObserver for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameExit {
    Completed,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Saved(GameSessionRecord),
    Failed(String),
    NotSubmitted,
}

/// Local view of a finished (or abandoned) game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub exit: GameExit,
    pub player_name: Option<String>,
    pub score: u32,
    pub correct_answers: u32,
    pub answered: usize,
    pub total_questions: usize,
    pub submission: SubmissionOutcome,
}

impl GameReport {
    fn from_session(
        session: &TriviaSession,
        exit: GameExit,
        submission: SubmissionOutcome,
    ) -> Self {
        Self {
            exit,
            player_name: session.player_name().map(str::to_owned),
            score: session.score(),
            correct_answers: session.correct_count(),
            answered: session.history().len(),
            total_questions: session.total_questions(),
            submission,
        }
    }

    fn quit(session: &TriviaSession) -> Self {
        Self::from_session(session, GameExit::Quit, SubmissionOutcome::NotSubmitted)
    }
}

//
// ─── DRIVER ────────────────────────────────────────────────────────────────────
//

/// Runs one game in real time against a `TriviaApi`.
///
/// Single task: the countdown timer and the result delay are the only
/// suspension points besides waiting for input.
pub struct GameDriver {
    api: Arc<dyn TriviaApi>,
    settings: GameSettings,
    feedback: FeedbackPicker,
}

enum Wake {
    Tick,
    Input(Option<PlayerInput>),
}

impl GameDriver {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>, settings: GameSettings) -> Self {
        Self {
            api,
            settings,
            feedback: FeedbackPicker::new(),
        }
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: FeedbackPicker) -> Self {
        self.feedback = feedback;
        self
    }

    /// Fetch the question list and build a session in `Setup`.
    ///
    /// # Errors
    ///
    /// Returns `GameRunError::Fetch` if the questions cannot be loaded, or
    /// `GameRunError::Game(GameError::NoQuestions)` if the list is empty.
    pub async fn load_session(&self) -> Result<TriviaSession, GameRunError> {
        let questions = self
            .api
            .fetch_questions()
            .await
            .map_err(GameRunError::Fetch)?;
        debug!(count = questions.len(), "loaded questions");
        Ok(TriviaSession::new(questions, self.settings)?)
    }

    /// Load questions and play one game.
    ///
    /// # Errors
    ///
    /// See [`GameDriver::load_session`]. A failed submission is not an error;
    /// it is reported on the returned `GameReport`.
    pub async fn run(
        &mut self,
        inputs: &mut mpsc::Receiver<PlayerInput>,
        observer: &mut dyn GameObserver,
    ) -> Result<GameReport, GameRunError> {
        let session = self.load_session().await?;
        self.play(session, inputs, observer).await
    }

    /// Play a session that is still in `Setup`.
    ///
    /// # Errors
    ///
    /// Returns `GameRunError::Game` if the session is not in `Setup`.
    pub async fn play(
        &mut self,
        mut session: TriviaSession,
        inputs: &mut mpsc::Receiver<PlayerInput>,
        observer: &mut dyn GameObserver,
    ) -> Result<GameReport, GameRunError> {
        if session.phase() != Phase::Setup {
            return Err(GameError::WrongPhase {
                expected: Phase::Setup,
                actual: session.phase(),
            }
            .into());
        }

        if !wait_for_start(&mut session, inputs, observer).await {
            return Ok(GameReport::quit(&session));
        }
        debug!(player = session.player_name(), "game started");
        show_question(&session, observer);

        let mut timer: Option<TickTimer> = None;
        loop {
            match session.phase() {
                Phase::InProgress => {
                    let active = timer.get_or_insert_with(|| TickTimer::start(TICK_PERIOD));
                    let wake = tokio::select! {
                        () = active.tick() => Wake::Tick,
                        input = inputs.recv() => Wake::Input(input),
                    };

                    match wake {
                        Wake::Tick => match session.tick() {
                            TickOutcome::Running { remaining } => {
                                observer.on_event(&GameEvent::Tick { remaining });
                            }
                            TickOutcome::Expired => {
                                debug!(index = session.progress().index, "question timed out");
                                timer = None;
                                self.show_result(&session, observer);
                            }
                            TickOutcome::Ignored => {}
                        },
                        Wake::Input(None | Some(PlayerInput::Quit)) => {
                            debug!("player quit mid-game");
                            return Ok(GameReport::quit(&session));
                        }
                        Wake::Input(Some(input)) => {
                            if apply_input(&mut session, input, observer) {
                                timer = None;
                                self.show_result(&session, observer);
                            }
                        }
                    }
                }
                Phase::ShowingResult => {
                    if !hold_result(&mut session, self.settings.result_delay, inputs, observer)
                        .await
                    {
                        debug!("player quit during result display");
                        return Ok(GameReport::quit(&session));
                    }
                    match session.finish_result()? {
                        Advance::Next => show_question(&session, observer),
                        Advance::Complete(tally) => {
                            info!(
                                player = %tally.player_name,
                                score = tally.score,
                                correct = tally.correct_answers,
                                total = tally.total_questions,
                                "game complete"
                            );
                            observer.on_event(&GameEvent::Completed(tally.clone()));
                            let submission = self.submit_tally(&tally, observer).await;
                            return Ok(GameReport::from_session(
                                &session,
                                GameExit::Completed,
                                submission,
                            ));
                        }
                    }
                }
                Phase::Setup | Phase::Complete => {
                    return Err(GameError::WrongPhase {
                        expected: Phase::InProgress,
                        actual: session.phase(),
                    }
                    .into());
                }
            }
        }
    }

    fn show_result(&mut self, session: &TriviaSession, observer: &mut dyn GameObserver) {
        if let Some(result) = session.last_result() {
            let feedback = self.feedback.pick(result);
            observer.on_event(&GameEvent::ResultShown {
                result: result.clone(),
                feedback,
            });
        }
    }

    async fn submit_tally(
        &self,
        tally: &NewGameSession,
        observer: &mut dyn GameObserver,
    ) -> SubmissionOutcome {
        match self.api.submit_session(tally).await {
            Ok(record) => {
                debug!(id = %record.id, "game session saved");
                observer.on_event(&GameEvent::SubmissionSaved(record.clone()));
                SubmissionOutcome::Saved(record)
            }
            Err(err) => {
                warn!(error = %err, "failed to save game session");
                let reason = err.to_string();
                observer.on_event(&GameEvent::SubmissionFailed(reason.clone()));
                SubmissionOutcome::Failed(reason)
            }
        }
    }
}

/// Returns `false` if the player quit before starting.
async fn wait_for_start(
    session: &mut TriviaSession,
    inputs: &mut mpsc::Receiver<PlayerInput>,
    observer: &mut dyn GameObserver,
) -> bool {
    loop {
        match inputs.recv().await {
            None | Some(PlayerInput::Quit) => return false,
            Some(PlayerInput::Start(name)) => match session.start(&name) {
                Ok(_) => return true,
                Err(err) => observer.on_event(&GameEvent::NameRejected(err)),
            },
            Some(_) => {}
        }
    }
}

/// Keep the result on screen for `delay`.
///
/// Answers that arrive meanwhile belong to the finished question and are
/// rejected, never carried over. Returns `false` if the player quit.
async fn hold_result(
    session: &mut TriviaSession,
    delay: Duration,
    inputs: &mut mpsc::Receiver<PlayerInput>,
    observer: &mut dyn GameObserver,
) -> bool {
    let delay = sleep(delay);
    tokio::pin!(delay);
    loop {
        tokio::select! {
            () = &mut delay => return true,
            input = inputs.recv() => match input {
                None | Some(PlayerInput::Quit) => return false,
                Some(input) => {
                    apply_input(session, input, observer);
                }
            },
        }
    }
}

/// Returns `true` when the input moved the session to `ShowingResult`.
fn apply_input(
    session: &mut TriviaSession,
    input: PlayerInput,
    observer: &mut dyn GameObserver,
) -> bool {
    let outcome = match input {
        PlayerInput::Select(choice) => session.select(choice).map(|()| {
            observer.on_event(&GameEvent::AnswerSelected(choice));
            false
        }),
        PlayerInput::Submit => session.submit().map(|_| true),
        PlayerInput::Skip => session.skip().map(|_| true),
        PlayerInput::Start(_) | PlayerInput::Quit => Ok(false),
    };

    outcome.unwrap_or_else(|err| {
        observer.on_event(&GameEvent::InputRejected(err));
        false
    })
}

fn show_question(session: &TriviaSession, observer: &mut dyn GameObserver) {
    if let Some(question) = session.current_question() {
        observer.on_event(&GameEvent::QuestionShown {
            question: question.clone(),
            progress: session.progress(),
            time_remaining: session.time_remaining(),
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::game::session::SubmitCause;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;
    use trivia_core::model::{GameSessionId, QuestionDraft, QuestionId};
    use trivia_core::time::fixed_now;

    struct StubApi {
        questions: Vec<Question>,
        fail_submit: bool,
        submitted: Mutex<Vec<NewGameSession>>,
    }

    impl StubApi {
        fn new(correct: &[AnswerChoice], fail_submit: bool) -> Self {
            let questions = correct
                .iter()
                .enumerate()
                .map(|(n, c)| {
                    let draft = QuestionDraft {
                        category: "Career".into(),
                        text: format!("Q{n}"),
                        option_a: "a".into(),
                        option_b: "b".into(),
                        option_c: "c".into(),
                        option_d: "d".into(),
                        correct_answer: *c,
                        difficulty: None,
                    };
                    Question::from_draft(QuestionId::generate(), draft, fixed_now()).unwrap()
                })
                .collect();
            Self {
                questions,
                fail_submit,
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TriviaApi for StubApi {
        async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
            Ok(self.questions.clone())
        }

        async fn submit_session(
            &self,
            tally: &NewGameSession,
        ) -> Result<GameSessionRecord, ApiError> {
            self.submitted.lock().unwrap().push(tally.clone());
            if self.fail_submit {
                return Err(ApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(GameSessionRecord::from_tally(GameSessionId::generate(), tally, fixed_now()).unwrap())
        }
    }

    fn driver(api: &Arc<StubApi>) -> GameDriver {
        driver_with(api, GameSettings::default())
    }

    fn driver_with(api: &Arc<StubApi>, settings: GameSettings) -> GameDriver {
        let api: Arc<dyn TriviaApi> = api.clone();
        GameDriver::new(api, settings).with_feedback(FeedbackPicker::seeded(1))
    }

    fn short_game(question_seconds: u32) -> GameSettings {
        GameSettings {
            question_seconds,
            ..GameSettings::default()
        }
    }

    /// Answers each question the moment it is shown and logs event times.
    struct ScriptedPlayer {
        tx: mpsc::Sender<PlayerInput>,
        plan: VecDeque<Vec<PlayerInput>>,
        started: Instant,
        log: Vec<(Duration, GameEvent)>,
    }

    impl ScriptedPlayer {
        fn new(tx: mpsc::Sender<PlayerInput>, plan: Vec<Vec<PlayerInput>>) -> Self {
            Self {
                tx,
                plan: plan.into(),
                started: Instant::now(),
                log: Vec::new(),
            }
        }

        fn events(&self) -> Vec<GameEvent> {
            self.log.iter().map(|(_, event)| event.clone()).collect()
        }

        fn at(&self, wanted: impl Fn(&GameEvent) -> bool) -> Vec<Duration> {
            self.log
                .iter()
                .filter(|(_, event)| wanted(event))
                .map(|(at, _)| *at)
                .collect()
        }
    }

    impl GameObserver for ScriptedPlayer {
        fn on_event(&mut self, event: &GameEvent) {
            self.log.push((self.started.elapsed(), event.clone()));
            if matches!(event, GameEvent::QuestionShown { .. }) {
                for input in self.plan.pop_front().unwrap_or_default() {
                    self.tx.try_send(input).unwrap();
                }
            }
        }
    }

    fn send_after(tx: &mpsc::Sender<PlayerInput>, after: Duration, inputs: Vec<PlayerInput>) {
        let tx = tx.clone();
        tokio::spawn(async move {
            sleep(after).await;
            for input in inputs {
                tx.send(input).await.unwrap();
            }
        });
    }

    fn result_causes(events: &[GameEvent]) -> Vec<(SubmitCause, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ResultShown { result, .. } => Some((result.cause, result.is_correct)),
                _ => None,
            })
            .collect()
    }

    async fn queue(inputs: Vec<PlayerInput>) -> (mpsc::Sender<PlayerInput>, mpsc::Receiver<PlayerInput>) {
        let (tx, rx) = mpsc::channel(32);
        for input in inputs {
            tx.send(input).await.unwrap();
        }
        (tx, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn plays_full_game_and_submits_once() {
        use AnswerChoice::{A, B, C, D};
        let api = Arc::new(StubApi::new(&[A, B, C], false));
        let (tx, mut rx) = queue(vec![PlayerInput::Start("Meera".into())]).await;
        let mut player = ScriptedPlayer::new(
            tx,
            vec![
                vec![PlayerInput::Select(A), PlayerInput::Submit],
                vec![PlayerInput::Select(B), PlayerInput::Submit],
                vec![PlayerInput::Select(D), PlayerInput::Submit],
            ],
        );

        let report = driver(&api).run(&mut rx, &mut player).await.unwrap();

        assert_eq!(report.exit, GameExit::Completed);
        assert_eq!(report.score, 200);
        assert_eq!(report.correct_answers, 2);
        assert_eq!(report.total_questions, 3);
        assert!(matches!(report.submission, SubmissionOutcome::Saved(_)));

        let submitted = api.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].player_name, "Meera");
        assert_eq!(submitted[0].score, 200);

        let events = player.events();
        let shown = events
            .iter()
            .filter(|e| matches!(e, GameEvent::QuestionShown { .. }))
            .count();
        assert_eq!(shown, 3);
        let results: Vec<bool> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ResultShown { feedback, .. } => Some(feedback.is_correct),
                _ => None,
            })
            .collect();
        assert_eq!(results, vec![true, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn answers_sent_during_result_display_are_discarded() {
        use AnswerChoice::{A, B};
        let api = Arc::new(StubApi::new(&[A, B], false));
        let (tx, mut rx) = queue(vec![PlayerInput::Start("Tara".into())]).await;
        // Question one expires at 1s; this lands while its result is shown.
        send_after(
            &tx,
            Duration::from_millis(1500),
            vec![PlayerInput::Select(B), PlayerInput::Submit],
        );
        let mut player = ScriptedPlayer::new(tx, Vec::new());

        let started = Instant::now();
        let report = driver_with(&api, short_game(1))
            .run(&mut rx, &mut player)
            .await
            .unwrap();

        let events = player.events();
        assert_eq!(
            result_causes(&events),
            vec![(SubmitCause::TimedOut, false), (SubmitCause::TimedOut, false)]
        );
        let stale = GameEvent::InputRejected(GameError::WrongPhase {
            expected: Phase::InProgress,
            actual: Phase::ShowingResult,
        });
        assert_eq!(events.iter().filter(|e| **e == stale).count(), 2);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::AnswerSelected(_))));
        assert_eq!(report.score, 0);
        assert_eq!(report.correct_answers, 0);
        assert_eq!(started.elapsed(), Duration::from_secs(2 * (1 + 2)));
    }

    #[tokio::test(start_paused = true)]
    async fn quit_during_result_display_ends_without_submitting() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::A, AnswerChoice::B], false));
        let (tx, mut rx) = queue(vec![PlayerInput::Start("Dev".into())]).await;
        send_after(&tx, Duration::from_millis(1500), vec![PlayerInput::Quit]);
        let mut player = ScriptedPlayer::new(tx, Vec::new());

        let report = driver_with(&api, short_game(1))
            .run(&mut rx, &mut player)
            .await
            .unwrap();

        assert_eq!(report.exit, GameExit::Quit);
        assert_eq!(report.answered, 1);
        assert_eq!(report.submission, SubmissionOutcome::NotSubmitted);
        assert!(api.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_restarts_fresh_after_manual_submit() {
        use AnswerChoice::{A, B};
        let api = Arc::new(StubApi::new(&[A, B], false));
        let (tx, mut rx) = queue(vec![PlayerInput::Start("Ravi".into())]).await;
        let mut player = ScriptedPlayer::new(
            tx,
            vec![vec![PlayerInput::Select(A), PlayerInput::Submit]],
        );

        driver_with(&api, short_game(3))
            .run(&mut rx, &mut player)
            .await
            .unwrap();

        // Question one is answered at 0s and its timer dropped; question two
        // is shown at 2s and must count its own full seconds from there.
        let is_tick = |e: &GameEvent| matches!(e, GameEvent::Tick { .. });
        assert_eq!(
            player.at(is_tick),
            vec![Duration::from_secs(3), Duration::from_secs(4)]
        );
        let remaining: Vec<u32> = player
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::Tick { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(remaining, vec![2, 1]);
        let is_result = |e: &GameEvent| matches!(e, GameEvent::ResultShown { .. });
        assert_eq!(
            player.at(is_result),
            vec![Duration::ZERO, Duration::from_secs(5)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn submit_racing_expiry_advances_once() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::A], false));
        let (tx, mut rx) = queue(vec![PlayerInput::Start("Zoya".into())]).await;
        send_after(&tx, Duration::from_secs(1), vec![PlayerInput::Submit]);
        let mut player = ScriptedPlayer::new(tx, vec![vec![PlayerInput::Select(AnswerChoice::A)]]);

        let report = driver_with(&api, short_game(1))
            .run(&mut rx, &mut player)
            .await
            .unwrap();

        let events = player.events();
        assert_eq!(result_causes(&events).len(), 1);
        assert_eq!(report.answered, 1);
        assert_eq!(report.score, 100);
        assert_eq!(api.submitted.lock().unwrap().len(), 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Completed(_)))
                .count(),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blank_name_is_reported_and_game_waits() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::A], false));
        let (_tx, mut rx) = queue(vec![
            PlayerInput::Start("   ".into()),
            PlayerInput::Submit,
            PlayerInput::Quit,
        ])
        .await;
        let mut events: Vec<GameEvent> = Vec::new();

        let report = driver(&api).run(&mut rx, &mut events).await.unwrap();

        assert_eq!(report.exit, GameExit::Quit);
        assert_eq!(report.submission, SubmissionOutcome::NotSubmitted);
        assert_eq!(events, vec![GameEvent::NameRejected(GameError::EmptyPlayerName)]);
        assert!(api.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_player_times_out_on_every_question() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::A, AnswerChoice::B], false));
        let (_tx, mut rx) = queue(vec![PlayerInput::Start("Kabir".into())]).await;
        let mut events: Vec<GameEvent> = Vec::new();

        let started = tokio::time::Instant::now();
        let report = driver(&api).run(&mut rx, &mut events).await.unwrap();

        assert_eq!(report.exit, GameExit::Completed);
        assert_eq!(report.score, 0);
        assert_eq!(report.answered, 2);
        assert_eq!(started.elapsed(), Duration::from_secs(2 * (45 + 2)));

        let ticks = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Tick { .. }))
            .count();
        assert_eq!(ticks, 2 * 44);
        assert_eq!(api.submitted.lock().unwrap()[0].correct_answers, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submission_still_reports_tally() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::C], true));
        let (_tx, mut rx) = queue(vec![
            PlayerInput::Start("Rohan".into()),
            PlayerInput::Select(AnswerChoice::C),
            PlayerInput::Submit,
        ])
        .await;
        let mut events: Vec<GameEvent> = Vec::new();

        let report = driver(&api).run(&mut rx, &mut events).await.unwrap();

        assert_eq!(report.exit, GameExit::Completed);
        assert_eq!(report.score, 100);
        assert!(matches!(report.submission, SubmissionOutcome::Failed(_)));
        assert_eq!(api.submitted.lock().unwrap().len(), 1);
        assert!(matches!(events.last(), Some(GameEvent::SubmissionFailed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_without_selection_is_rejected_in_place() {
        let api = Arc::new(StubApi::new(&[AnswerChoice::A], false));
        let (_tx, mut rx) = queue(vec![
            PlayerInput::Start("Ishita".into()),
            PlayerInput::Submit,
            PlayerInput::Skip,
        ])
        .await;
        let mut events: Vec<GameEvent> = Vec::new();

        let report = driver(&api).run(&mut rx, &mut events).await.unwrap();

        assert!(events.contains(&GameEvent::InputRejected(GameError::NoSelection)));
        assert_eq!(report.answered, 1);
        assert_eq!(report.score, 0);
    }

    #[tokio::test]
    async fn empty_question_bank_never_starts() {
        let api = Arc::new(StubApi::new(&[], false));
        let (_tx, mut rx) = queue(vec![PlayerInput::Start("Aarav".into())]).await;
        let mut events: Vec<GameEvent> = Vec::new();

        let err = driver(&api).run(&mut rx, &mut events).await.unwrap_err();
        assert!(matches!(err, GameRunError::Game(GameError::NoQuestions)));
        assert!(events.is_empty());
    }
}
