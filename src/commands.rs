use crate::cli::Args;
use live_sports_streams::config::user_prompts::prompt_for_backend_url;
use live_sports_streams::constants::polling;
use live_sports_streams::data_fetcher::processors::{leagues, live_count};
use live_sports_streams::error::AppError;
use live_sports_streams::{
    Config, Event, EventStatus, GameDirectory, GameFilter, select_default_stream,
};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    println!("{} {}", live_sports_streams::NAME, live_sports_streams::VERSION);
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// An empty `--config` value prompts for the backend URL.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_url) = &args.new_backend_url {
        config.backend_url = if new_url.trim().is_empty() {
            prompt_for_backend_url().await?
        } else {
            new_url.clone()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

fn status_label(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Live => "LIVE",
        EventStatus::Upcoming => "UPCOMING",
        EventStatus::Finished => "FINAL",
    }
}

/// One line per game: status, league, teams, score and the default stream.
pub fn format_game_line(game: &Event) -> String {
    let score = game
        .score_line()
        .map(|s| format!(" {s}"))
        .unwrap_or_default();
    let stream = select_default_stream(game)
        .map(|s| format!("{} {}", s.quality, s.url))
        .unwrap_or_else(|| "no working stream".to_string());

    format!(
        "[{}] {:<8} {} vs {}{} | {} | {}",
        game.id,
        status_label(game.status),
        game.home_team,
        game.away_team,
        score,
        game.league,
        stream
    )
}

/// A game followed by every working stream, best first.
pub fn format_game_detail(game: &Event) -> String {
    let mut out = format_game_line(game);
    out.push_str(&format!("\n  starts {}", game.start_time));
    if game.streams.is_empty() {
        out.push_str("\n  no working streams");
    }
    for stream in &game.streams {
        let server = if stream.server.is_empty() {
            String::new()
        } else {
            format!(" ({})", stream.server)
        };
        out.push_str(&format!(
            "\n  {:<4} {}{}",
            stream.quality.as_str(),
            stream.url,
            server
        ));
    }
    out
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn filter_from_args(args: &Args) -> GameFilter {
    let mut filter = GameFilter::default();
    if let Some(league) = &args.league {
        filter = filter.with_league(league.clone());
    }
    if let Some(query) = &args.search {
        filter = filter.with_query(query.clone());
    }
    if args.live_only {
        filter = filter.live_only();
    }
    filter
}

/// Handles --game: prints one game with all of its ranked streams.
pub async fn handle_game_command(
    directory: &GameDirectory,
    id: &str,
    args: &Args,
) -> Result<(), AppError> {
    match directory.get_game_by_id(id, args.force_refresh).await {
        Some(game) if args.json => print_json(&game)?,
        Some(game) => println!("{}", format_game_detail(&game)),
        None => println!("Game {id} not found"),
    }
    Ok(())
}

/// Prints today's games after applying the query flags.
pub async fn handle_list_command(
    directory: &GameDirectory,
    args: &Args,
    force_refresh: bool,
) -> Result<(), AppError> {
    let games = directory.browse(&filter_from_args(args), force_refresh).await;

    if args.json {
        return print_json(&games);
    }

    if games.is_empty() {
        println!("No games found");
    } else {
        println!(
            "{} games, {} live ({})",
            games.len(),
            live_count(&games),
            leagues(&games).join(", ")
        );
        for game in &games {
            println!("{}", format_game_line(game));
        }
    }
    Ok(())
}

/// Handles --watch: re-prints the list on every polling tick until Ctrl-C.
pub async fn run_watch(directory: &GameDirectory, args: &Args) -> Result<(), AppError> {
    let mut interval =
        tokio::time::interval(Duration::from_secs(polling::REFRESH_INTERVAL_SECONDS));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut first_tick = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Only the first tick honours --refresh
                let force_refresh = args.force_refresh && first_tick;
                first_tick = false;
                if let Err(e) = handle_list_command(directory, args, force_refresh).await {
                    warn!("Failed to print games: {e}");
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!("Failed to listen for Ctrl-C: {e}");
                }
                info!("Stopping watch mode");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_sports_streams::testing_utils::TestDataBuilder;

    #[test]
    fn test_format_game_line_uses_best_stream() {
        let game = TestDataBuilder::with_streams(
            TestDataBuilder::live_event("1", "Lakers", "Celtics", 98, 92),
            vec![
                TestDataBuilder::stream("fhd", "FHD", true),
                TestDataBuilder::stream("hd", "HD", true),
            ],
        );

        let line = format_game_line(&game);
        assert!(line.starts_with("[1] LIVE"));
        assert!(line.contains("Lakers vs Celtics 98 - 92"));
        assert!(line.ends_with("FHD https://streams.example.com/embed/fhd"));
    }

    #[test]
    fn test_format_game_line_without_streams() {
        let game = TestDataBuilder::event("2", "Arsenal", "Chelsea", "Soccer");
        let line = format_game_line(&game);
        assert!(line.contains("UPCOMING"));
        assert!(line.ends_with("no working stream"));
    }

    #[test]
    fn test_format_game_detail_lists_every_stream() {
        let game = TestDataBuilder::with_streams(
            TestDataBuilder::event("3", "Arsenal", "Chelsea", "Soccer"),
            vec![
                TestDataBuilder::stream("a", "HD", true),
                TestDataBuilder::stream("b", "SD", true),
            ],
        );
        let detail = format_game_detail(&game);
        assert_eq!(detail.lines().count(), 4);
        assert!(detail.contains("HD   https://streams.example.com/embed/a (Stream-a)"));
    }

    #[test]
    fn test_filter_from_args() {
        use clap::Parser;
        let args = Args::parse_from(["live_sports_streams", "--league", "NBA", "--live"]);
        let filter = filter_from_args(&args);
        assert_eq!(filter.league.as_deref(), Some("NBA"));
        assert!(filter.live_only);
        assert!(filter.query.is_none());
    }
}
