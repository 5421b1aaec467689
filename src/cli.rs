use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the invocation only touches the config file
pub fn is_config_operation(args: &Args) -> bool {
    args.new_backend_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Live Sports Stream Directory
///
/// Lists today's games from a stream directory backend together with
/// their working stream links, best quality first.
///
/// Results are cached for five minutes. When the backend cannot be reached,
/// the last known list is shown instead.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show a single game and all of its working streams.
    #[arg(long = "game", short = 'g', value_name = "ID", help_heading = "Queries")]
    pub game_id: Option<String>,

    /// Only show games whose teams or league contain this text (case-insensitive).
    #[arg(long = "search", short = 's', value_name = "QUERY", help_heading = "Queries")]
    pub search: Option<String>,

    /// Only show games from this league. "all" disables the filter.
    #[arg(long = "league", value_name = "LEAGUE", help_heading = "Queries")]
    pub league: Option<String>,

    /// Only show games that are currently live.
    #[arg(long = "live", help_heading = "Queries")]
    pub live_only: bool,

    /// Bypass the cache and ask the backend directly.
    #[arg(long = "refresh", short = 'r', help_heading = "Queries")]
    pub force_refresh: bool,

    /// Print results as JSON instead of plain lines.
    #[arg(long = "json", help_heading = "Output")]
    pub json: bool,

    /// Keep running and re-print the list every five minutes until Ctrl-C.
    #[arg(long = "watch", short = 'w', help_heading = "Output")]
    pub watch: bool,

    /// Update backend URL in config. Will prompt for a new URL if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "BACKEND_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_backend_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_flags() {
        let args = Args::parse_from([
            "live_sports_streams",
            "--search",
            "lakers",
            "--league",
            "NBA",
            "--live",
            "--json",
        ]);
        assert_eq!(args.search.as_deref(), Some("lakers"));
        assert_eq!(args.league.as_deref(), Some("NBA"));
        assert!(args.live_only);
        assert!(args.json);
        assert!(!is_config_operation(&args));
    }

    #[test]
    fn test_config_without_value_prompts() {
        let args = Args::parse_from(["live_sports_streams", "--config"]);
        assert_eq!(args.new_backend_url.as_deref(), Some(""));
        assert!(is_config_operation(&args));
    }

    #[test]
    fn test_game_flag() {
        let args = Args::parse_from(["live_sports_streams", "-g", "42", "-r"]);
        assert_eq!(args.game_id.as_deref(), Some("42"));
        assert!(args.force_refresh);
    }
}
