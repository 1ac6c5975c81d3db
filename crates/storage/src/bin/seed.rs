use std::fmt;

use chrono::{DateTime, Duration, Utc};
use storage::Storage;
use storage::seed::seed_default_questions;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use trivia_core::Clock;
use trivia_core::model::{GameSessionId, GameSessionRecord, NewGameSession};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    sessions: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSessions { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSessions { raw } => write!(f, "invalid --sessions value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TRIVIA_DB_URL")
            .unwrap_or_else(|_| "sqlite://trivia.sqlite3?mode=rwc".into());
        let mut sessions = std::env::var("TRIVIA_SEED_SESSIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(0);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--sessions" => {
                    let value = require_value(&mut args, "--sessions")?;
                    sessions = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidSessions { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            sessions,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>    SQLite URL (default: sqlite://trivia.sqlite3?mode=rwc)");
    eprintln!("  --sessions <n>       Sample leaderboard entries to append (default: 0)");
    eprintln!("  --now <rfc3339>      Fixed current time for deterministic seeding");
    eprintln!("  -h, --help           Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  TRIVIA_DB_URL, TRIVIA_SEED_SESSIONS");
}

const SAMPLE_PLAYERS: [&str; 5] = ["Aarav", "Meera", "Kabir", "Ishita", "Rohan"];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let clock = args.now.map_or_else(Clock::system, Clock::fixed);
    let now = clock.now();

    let inserted = seed_default_questions(storage.questions.as_ref(), &clock).await?;
    let total_questions = u32::try_from(storage.questions.count_questions().await?)?;

    for i in 0..args.sessions {
        let idx = (i as usize) % SAMPLE_PLAYERS.len();
        let correct = (i * 3 + 5) % (total_questions + 1);
        let tally = NewGameSession {
            player_name: SAMPLE_PLAYERS[idx].to_owned(),
            score: correct * trivia_core::scoring::POINTS_PER_CORRECT,
            correct_answers: correct,
            total_questions,
        };
        let completed_at = now - Duration::hours(i64::from(i) * 5);
        let record = GameSessionRecord::from_tally(GameSessionId::generate(), &tally, completed_at)?;
        storage.game_sessions.append_session(&record).await?;
    }

    println!(
        "Seeded {inserted} questions and {} leaderboard entries into {}",
        args.sessions, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    log_fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
