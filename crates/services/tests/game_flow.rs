use std::sync::Arc;

use services::game::FeedbackPicker;
use services::{
    GameDriver, GameEvent, GameExit, GameObserver, GameSettings, LocalTriviaApi, PlayerInput,
    SubmissionOutcome, TriviaApi,
};
use storage::Storage;
use storage::seed::seed_default_questions;
use tokio::sync::mpsc;
use trivia_core::time::fixed_clock;

/// Picks the right answer for every question it is shown.
struct PerfectPlayer {
    tx: mpsc::Sender<PlayerInput>,
    events: Vec<GameEvent>,
}

impl GameObserver for PerfectPlayer {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::QuestionShown { question, .. } = event {
            self.tx
                .try_send(PlayerInput::Select(question.correct_answer()))
                .unwrap();
            self.tx.try_send(PlayerInput::Submit).unwrap();
        }
        self.events.push(event.clone());
    }
}

#[tokio::test(start_paused = true)]
async fn seeded_game_lands_on_leaderboard() {
    let storage = Storage::in_memory();
    seed_default_questions(storage.questions.as_ref(), &fixed_clock())
        .await
        .unwrap();
    let local = LocalTriviaApi::from_storage(fixed_clock(), &storage);
    let total = local.fetch_questions().await.unwrap().len();

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(PlayerInput::Start("Trisha".into())).await.unwrap();

    let api: Arc<dyn TriviaApi> = Arc::new(local);
    let mut driver =
        GameDriver::new(api, GameSettings::default()).with_feedback(FeedbackPicker::seeded(3));
    let mut player = PerfectPlayer {
        tx,
        events: Vec::new(),
    };
    let report = driver.run(&mut rx, &mut player).await.unwrap();

    assert_eq!(report.exit, GameExit::Completed);
    assert_eq!(report.total_questions, total);
    assert_eq!(report.correct_answers as usize, total);
    assert_eq!(report.score as usize, total * 100);

    let SubmissionOutcome::Saved(record) = report.submission else {
        panic!("expected saved submission");
    };
    let top = storage.game_sessions.top_sessions(10).await.unwrap();
    assert_eq!(top, vec![record]);
    assert_eq!(
        player
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Completed(_)))
            .count(),
        1
    );
    assert!(
        !player
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::InputRejected(_)))
    );
}

#[tokio::test(start_paused = true)]
async fn quitting_mid_game_submits_nothing() {
    let storage = Storage::in_memory();
    seed_default_questions(storage.questions.as_ref(), &fixed_clock())
        .await
        .unwrap();
    let api: Arc<dyn TriviaApi> = Arc::new(LocalTriviaApi::from_storage(fixed_clock(), &storage));

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(PlayerInput::Start("Kabir".into())).await.unwrap();
    tx.send(PlayerInput::Skip).await.unwrap();
    tx.send(PlayerInput::Quit).await.unwrap();

    let mut driver = GameDriver::new(api, GameSettings::default());
    let mut events: Vec<GameEvent> = Vec::new();
    let report = driver.run(&mut rx, &mut events).await.unwrap();

    assert_eq!(report.exit, GameExit::Quit);
    assert_eq!(report.answered, 1);
    assert_eq!(report.submission, SubmissionOutcome::NotSubmitted);
    assert_eq!(storage.game_sessions.count_sessions().await.unwrap(), 0);
}
