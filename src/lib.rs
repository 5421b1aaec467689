//! Live Sports Stream Directory Client Library
//!
//! This library fetches today's games and their stream links from a
//! directory backend, keeps a short-lived cache of what it has seen, and
//! ranks each game's working streams by quality.
//!
//! # Examples
//!
//! ```rust,no_run
//! use live_sports_streams::{Config, GameDirectory, select_default_stream};
//! use live_sports_streams::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let directory = GameDirectory::from_config(&config)?;
//!
//!     for game in directory.get_todays_games(false).await {
//!         let stream = select_default_stream(&game)
//!             .map(|s| s.url.as_str())
//!             .unwrap_or("no working stream");
//!         println!("{} vs {}: {}", game.home_team, game.away_team, stream);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{GameSource, HttpGameSource, RetryPolicy};
pub use data_fetcher::models::{Event, EventStatus, StreamCandidate, StreamQuality};
pub use data_fetcher::processors::{GameFilter, failover_stream, select_default_stream};
pub use data_fetcher::{CacheKey, DirectoryEvent, DirectoryObserver, GameDirectory};
pub use error::{AppError, ErrorKind};

// Cache monitoring for external tools
pub use data_fetcher::cache::{CacheInfo, CacheStats};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
