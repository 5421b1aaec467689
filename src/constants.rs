//! Application-wide constants and configuration values
//!
//! This module centralizes policy numbers so the directory, the config layer
//! and the command-line consumer agree on the same defaults.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Cache policy values
pub mod cache {
    /// Freshness window for cached snapshots (5 minutes)
    pub const FRESHNESS_WINDOW_SECONDS: u64 = 300;

    /// Maximum number of per-game detail entries kept in memory
    pub const DETAIL_CACHE_CAPACITY: usize = 200;
}

/// Retry configuration
pub mod retry {
    /// Maximum number of attempts for a single remote call
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Fixed delay between attempts (milliseconds)
    pub const BACKOFF_DELAY_MS: u64 = 500;
}

/// Polling trigger used by the command-line consumer in `--watch` mode
pub mod polling {
    /// Interval between background refreshes (5 minutes)
    pub const REFRESH_INTERVAL_SECONDS: u64 = 300;
}

/// Remote endpoint paths
pub mod endpoints {
    /// Collection of today's events
    pub const LIVE_GAMES: &str = "/api/live-games";

    /// Prefix for a single event, followed by its id
    pub const GAME: &str = "/api/game";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for backend URL override
    pub const BACKEND_URL: &str = "STREAMS_BACKEND_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "STREAMS_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "STREAMS_HTTP_TIMEOUT";
}

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "live_sports_streams.log";
