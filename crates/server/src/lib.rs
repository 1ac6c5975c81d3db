//! REST service for the trivia game: question bank admin, game session
//! recording, leaderboard, and analytics.

#![forbid(unsafe_code)]

use std::future::Future;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiFailure, StartupError};
pub use state::AppState;

/// Install the `RUST_LOG`-driven subscriber. Later calls are no-ops.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/questions",
            get(routes::list_questions).post(routes::create_question),
        )
        .route(
            "/api/questions/{id}",
            put(routes::update_question).delete(routes::delete_question),
        )
        .route("/api/game-sessions", post(routes::record_game_session))
        .route("/api/leaderboard", get(routes::leaderboard))
        .route("/api/analytics", get(routes::analytics))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns `StartupError::Io` if the server stops with an IO error.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), StartupError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Build state from config, bind, and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns `StartupError` if the store cannot be opened, the address cannot
/// be bound, or serving fails.
pub async fn start_server(config: ServerConfig) -> Result<(), StartupError> {
    info!("Initializing state...");
    let state = AppState::from_config(&config).await?;

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
