//! Forum Voting Warga entry point.
//!
//! Loads the configuration, seeds the in-memory store and prints the poll
//! board of the configured category as JSON.

use std::process::ExitCode;

use forum_warga_common::{AppError, AppResult, Config};
use forum_warga_core::AppState;
use forum_warga_db::entities::CategoryFilter;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Render the poll board selected by `config` as pretty JSON.
async fn render_board(config: &Config) -> AppResult<String> {
    let filter: CategoryFilter = config
        .app
        .board_filter
        .parse()
        .map_err(AppError::Config)?;
    let state = AppState::seeded(config)?;

    let board = state.board(filter).await;
    info!(polls = board.len(), "Poll board ready");

    serde_json::to_string_pretty(&board)
        .map_err(|e| AppError::Internal(format!("Failed to encode board: {e}")))
}

async fn run() -> AppResult<()> {
    let config = Config::load()?;
    info!(name = %config.app.name, timezone = %config.app.timezone, "Starting forum");

    println!("{}", render_board(&config).await?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forum_warga=debug".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), error = %err, "Board unavailable");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_board_filters_by_category() {
        let mut config = Config::without_latency();
        config.app.board_filter = "security".to_string();

        let json = render_board(&config).await.unwrap();
        let cards: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["title"], "Sistem Keamanan 24 Jam");
        assert_eq!(cards[0]["categoryLabel"], "Keamanan");
    }

    #[tokio::test]
    async fn test_unknown_filter_reports_user_message() {
        let mut config = Config::without_latency();
        config.app.board_filter = "olahraga".to_string();

        let err = render_board(&config).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert_eq!(err.user_message(), "Terjadi kesalahan sistem");
    }
}
