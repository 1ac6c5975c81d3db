use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use server::ServerConfig;
use services::{
    Clock, GameDriver, GameSettings, HttpTriviaApi, HttpTriviaConfig, LeaderboardService,
    LocalTriviaApi, TriviaApi,
};
use storage::Storage;
use storage::seed::seed_default_questions;
use tokio::sync::mpsc;
use tracing::info;
use trivia_core::model::GameSessionRecord;

mod terminal;

use terminal::{TerminalObserver, print_leaderboard, print_report, spawn_stdin_reader};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidPort { raw: String },
    InvalidBind { raw: String },
    InvalidSeconds { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play  [--server <url> | --db <sqlite_url>] [--seconds <n>]");
    eprintln!("  cargo run -p app -- serve [--bind <ip>] [--port <port>] [--db <sqlite_url>] [--no-seed]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  play with no --server/--db uses an in-memory bank with the stock questions");
    eprintln!("  serve binds 0.0.0.0:5000");
    eprintln!("  seed a sqlite bank with `cargo run -p storage --bin seed`");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_SERVER_URL, TRIVIA_DB_URL, TRIVIA_BIND, TRIVIA_PORT, TRIVIA_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

/// Where a terminal game gets its questions and sends its tally.
#[derive(Debug, Clone)]
enum Backend {
    Remote(HttpTriviaConfig),
    Sqlite(String),
    Memory,
}

#[derive(Debug)]
struct PlayArgs {
    backend: Backend,
    settings: GameSettings,
}

impl PlayArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut server = HttpTriviaConfig::from_env();
        let mut db_url = std::env::var("TRIVIA_DB_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(normalize_sqlite_url);
        let mut settings = GameSettings::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => {
                    server = Some(HttpTriviaConfig::new(require_value(args, "--server")?));
                }
                "--db" => db_url = Some(parse_db(require_value(args, "--db")?)?),
                "--seconds" => {
                    let value = require_value(args, "--seconds")?;
                    settings.question_seconds = value
                        .parse::<u32>()
                        .ok()
                        .filter(|s| *s > 0)
                        .ok_or(ArgsError::InvalidSeconds { raw: value })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = match (server, db_url) {
            (Some(config), _) => Backend::Remote(config),
            (None, Some(db)) => Backend::Sqlite(db),
            (None, None) => Backend::Memory,
        };
        Ok(Self { backend, settings })
    }
}

fn parse_serve(
    args: &mut impl Iterator<Item = String>,
    mut config: ServerConfig,
) -> Result<ServerConfig, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let value = require_value(args, "--port")?;
                config.port = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
            }
            "--bind" => {
                let value = require_value(args, "--bind")?;
                config.bind = value
                    .parse::<IpAddr>()
                    .map_err(|_| ArgsError::InvalidBind { raw: value.clone() })?;
            }
            "--db" => config.db_url = Some(parse_db(require_value(args, "--db")?)?),
            "--no-seed" => config.seed = false,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(config)
}

fn parse_db(value: String) -> Result<String, ArgsError> {
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: value });
    }
    Ok(normalize_sqlite_url(value))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and parent directories) so sqlx can open it.
fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_storage(db_url: &str) -> Result<Storage, Box<dyn std::error::Error>> {
    prepare_sqlite_file(db_url)?;
    Ok(Storage::sqlite(db_url).await?)
}

async fn run_play(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::system();
    let mut remote: Option<HttpTriviaApi> = None;
    let mut local_board: Option<LeaderboardService> = None;

    let api: Arc<dyn TriviaApi> = match &args.backend {
        Backend::Remote(config) => {
            let http = HttpTriviaApi::new(config)?;
            remote = Some(http.clone());
            Arc::new(http)
        }
        Backend::Sqlite(_) | Backend::Memory => {
            let storage = match &args.backend {
                Backend::Sqlite(db_url) => open_storage(db_url).await?,
                _ => Storage::in_memory(),
            };
            seed_default_questions(storage.questions.as_ref(), &clock).await?;
            local_board = Some(LeaderboardService::new(
                clock,
                storage.game_sessions.clone(),
                storage.questions.clone(),
            ));
            Arc::new(LocalTriviaApi::from_storage(clock, &storage))
        }
    };

    let awaiting_name = Arc::new(AtomicBool::new(true));
    let (tx, mut rx) = mpsc::channel(16);
    spawn_stdin_reader(tx, Arc::clone(&awaiting_name));
    let mut observer = TerminalObserver::new(awaiting_name);

    println!("🎂 Birthday Trivia");
    println!("Enter your name to start (:q to quit):");

    let mut driver = GameDriver::new(api, args.settings);
    let report = driver.run(&mut rx, &mut observer).await?;
    print_report(&report);

    let board: Vec<GameSessionRecord> = if let Some(http) = &remote {
        http.leaderboard(None).await.unwrap_or_default()
    } else if let Some(board) = &local_board {
        board.leaderboard(None).await.unwrap_or_default()
    } else {
        Vec::new()
    };
    print_leaderboard(&board);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => {
            let cmd = Command::from_arg(first).ok_or_else(|| {
                print_usage();
                ArgsError::UnknownCommand(first.to_owned())
            })?;
            argv.remove(0);
            cmd
        }
    };

    let mut iter = argv.into_iter();
    match cmd {
        Command::Play => {
            let args = PlayArgs::parse(&mut iter).inspect_err(|_| print_usage())?;
            run_play(args).await
        }
        Command::Serve => {
            let config = parse_serve(&mut iter, ServerConfig::load()?)
                .inspect_err(|_| print_usage())?;
            if let Some(db_url) = &config.db_url {
                prepare_sqlite_file(db_url)?;
            }
            info!(address = %config.address(), "starting trivia server");
            server::start_server(config).await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    server::init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
