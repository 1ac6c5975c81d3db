//! Line-oriented terminal front end for one game.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use services::game::{Feedback, GameEvent, GameObserver, SubmitCause};
use services::{GameError, GameReport, PlayerInput, SubmissionOutcome};
use tokio::sync::mpsc;
use trivia_core::model::{AnswerChoice, GameSessionRecord};

/// Countdown values worth announcing; the rest stay quiet.
const ANNOUNCE_AT: [u32; 6] = [30, 15, 10, 3, 2, 1];

/// Quits from any prompt. A bare `q` also quits once the game is running.
const QUIT_COMMAND: &str = ":q";

/// Map one input line to a player action.
///
/// While waiting for a name every line except `:q` is a name attempt, so a
/// player may be called "q".
#[must_use]
pub fn parse_line(line: &str, awaiting_name: bool) -> Option<PlayerInput> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(QUIT_COMMAND) {
        return Some(PlayerInput::Quit);
    }
    if awaiting_name {
        return Some(PlayerInput::Start(trimmed.to_owned()));
    }
    if trimmed.eq_ignore_ascii_case("q") {
        return Some(PlayerInput::Quit);
    }
    if trimmed.is_empty() {
        return Some(PlayerInput::Submit);
    }
    if trimmed.eq_ignore_ascii_case("s") {
        return Some(PlayerInput::Skip);
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => AnswerChoice::from_letter(letter).ok().map(PlayerInput::Select),
        _ => None,
    }
}

/// Forward stdin lines to the driver until stdin closes or the player quits.
///
/// Runs on a plain thread: a blocking read must not hold up runtime shutdown.
pub fn spawn_stdin_reader(tx: mpsc::Sender<PlayerInput>, awaiting_name: Arc<AtomicBool>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(input) = parse_line(&line, awaiting_name.load(Ordering::Relaxed)) else {
                println!("  (a-d to choose, enter to submit, s to skip, q to quit)");
                continue;
            };
            let quit = input == PlayerInput::Quit;
            if tx.blocking_send(input).is_err() || quit {
                break;
            }
        }
    });
}

/// Prints game events to stdout.
pub struct TerminalObserver {
    awaiting_name: Arc<AtomicBool>,
}

impl TerminalObserver {
    #[must_use]
    pub fn new(awaiting_name: Arc<AtomicBool>) -> Self {
        Self { awaiting_name }
    }
}

fn print_feedback(feedback: &Feedback) {
    println!("  {}", feedback.title);
    println!("  {}", feedback.detail);
}

impl GameObserver for TerminalObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NameRejected(GameError::EmptyPlayerName) => {
                println!("Player name required. Please enter your name to start the trivia.");
            }
            GameEvent::InputRejected(GameError::WrongPhase { .. }) => {
                println!("  (hold on, the next question is coming up)");
            }
            GameEvent::NameRejected(err) | GameEvent::InputRejected(err) => {
                println!("  {err}");
            }
            GameEvent::QuestionShown {
                question,
                progress,
                time_remaining,
            } => {
                self.awaiting_name.store(false, Ordering::Relaxed);
                println!();
                println!(
                    "Question {} of {}  [{}]  {}s",
                    progress.index + 1,
                    progress.total,
                    question.category(),
                    time_remaining
                );
                println!("{}", question.text());
                for (choice, text) in question.options() {
                    println!("  {choice}) {text}");
                }
            }
            GameEvent::Tick { remaining } => {
                if ANNOUNCE_AT.contains(remaining) {
                    println!("  ⏳ {remaining}s left");
                }
            }
            GameEvent::AnswerSelected(choice) => {
                println!("  selected {choice}, press enter to submit");
            }
            GameEvent::ResultShown { result, feedback } => {
                if result.cause == SubmitCause::TimedOut {
                    println!("  ⏰ Time's up!");
                }
                print_feedback(feedback);
            }
            GameEvent::Completed(tally) => {
                println!();
                println!("🎉 Trivia complete, {}!", tally.player_name);
                println!("  Final score:   {}", tally.score);
                println!("  Correct:       {}", tally.correct_answers);
                println!("  Wrong:         {}", tally.wrong_answers());
            }
            GameEvent::SubmissionSaved(_) => {
                println!("Score Saved! 🎉 Your trivia results have been added to the leaderboard.");
            }
            GameEvent::SubmissionFailed(reason) => {
                println!("Could not save your score ({reason}). Your results are shown above.");
            }
        }
        let _ = io::stdout().flush();
    }
}

pub fn print_report(report: &GameReport) {
    if matches!(report.submission, SubmissionOutcome::NotSubmitted) {
        println!(
            "Game ended after {} of {} questions with {} points.",
            report.answered, report.total_questions, report.score
        );
    }
}

pub fn print_leaderboard(entries: &[GameSessionRecord]) {
    if entries.is_empty() {
        return;
    }
    println!();
    println!("🏆 Leaderboard");
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>5}  ({}/{})",
            rank + 1,
            entry.player_name,
            entry.score,
            entry.correct_answers,
            entry.total_questions
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_phase_takes_whole_line() {
        assert_eq!(
            parse_line("  a  ", true),
            Some(PlayerInput::Start("a".into()))
        );
        assert_eq!(parse_line(":q", true), Some(PlayerInput::Quit));
    }

    #[test]
    fn single_letter_q_is_a_valid_name() {
        assert_eq!(parse_line("q", true), Some(PlayerInput::Start("q".into())));
        assert_eq!(parse_line(" Q ", true), Some(PlayerInput::Start("Q".into())));
        assert_eq!(parse_line("q", false), Some(PlayerInput::Quit));
        assert_eq!(parse_line(":Q", false), Some(PlayerInput::Quit));
    }

    #[test]
    fn game_lines_map_to_actions() {
        assert_eq!(
            parse_line("c", false),
            Some(PlayerInput::Select(AnswerChoice::C))
        );
        assert_eq!(parse_line("", false), Some(PlayerInput::Submit));
        assert_eq!(parse_line("S", false), Some(PlayerInput::Skip));
        assert_eq!(parse_line("e", false), None);
        assert_eq!(parse_line("ab", false), None);
    }
}
