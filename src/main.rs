// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation};
use live_sports_streams::error::AppError;
use live_sports_streams::{Config, GameDirectory};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config operations run before logging setup
    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;
    let directory = GameDirectory::from_config(&config)?;

    if let Some(id) = &args.game_id {
        return commands::handle_game_command(&directory, id, &args).await;
    }

    if args.watch {
        return commands::run_watch(&directory, &args).await;
    }

    commands::handle_list_command(&directory, &args, args.force_refresh).await
}
