//! The game directory client: cache lookup, remote refresh with retry, stream ranking.

use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, normalize_backend_url};
use crate::constants::cache as cache_policy;
use crate::data_fetcher::api::{GameSource, HttpGameSource, RetryPolicy, fetch_with_retry};
use crate::data_fetcher::cache::{CacheStats, GameCache, StoreOutcome};
use crate::data_fetcher::models::Event;
use crate::data_fetcher::processors::{
    GameFilter, apply_filter, prepare_event, prepare_events, search_games,
};
use crate::error::AppError;

/// Which cache slot a [`DirectoryEvent`] is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    TodaysGames,
    Game(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::TodaysGames => f.write_str("todays-games"),
            CacheKey::Game(id) => write!(f, "game:{id}"),
        }
    }
}

/// Notifications emitted to an observer registered with [`GameDirectory::with_observer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    CacheHit { key: CacheKey },
    CacheMiss { key: CacheKey },
    FetchAttemptFailed { key: CacheKey, attempt: u32, error: String },
    FetchSucceeded { key: CacheKey, count: usize },
    FetchExhausted { key: CacheKey, error: String },
    /// A failed refresh was answered from an expired snapshot.
    ServedStale { key: CacheKey },
    /// A response arrived after a newer one and was not cached.
    StaleWriteDiscarded { key: CacheKey },
    GameNotFound { id: String },
}

pub type DirectoryObserver = Arc<dyn Fn(&DirectoryEvent) + Send + Sync>;

/// Client over the remote game directory.
///
/// Every instance owns its own cache, so independent instances never share
/// state. Query methods never fail: when the backend cannot be reached they
/// answer from the last snapshot, or with an empty result.
pub struct GameDirectory {
    source: Arc<dyn GameSource>,
    retry: RetryPolicy,
    freshness_window: Duration,
    cache: RwLock<GameCache>,
    observer: Option<DirectoryObserver>,
}

impl GameDirectory {
    pub fn new(source: Arc<dyn GameSource>) -> Self {
        Self {
            source,
            retry: RetryPolicy::default(),
            freshness_window: Duration::from_secs(cache_policy::FRESHNESS_WINDOW_SECONDS),
            cache: RwLock::new(GameCache::new(default_detail_capacity())),
            observer: None,
        }
    }

    /// Builds a directory backed by the HTTP source described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let source = HttpGameSource::with_timeout(
            &normalize_backend_url(&config.backend_url),
            config.http_timeout_seconds,
        )?;
        let capacity = NonZeroUsize::new(config.detail_cache_capacity)
            .ok_or_else(|| AppError::config_error("Detail cache capacity must be positive"))?;

        Ok(Self::new(Arc::new(source))
            .with_retry_policy(RetryPolicy::new(
                config.retry_max_attempts,
                Duration::from_millis(config.retry_backoff_ms),
            ))
            .with_freshness_window(Duration::from_secs(config.freshness_window_seconds))
            .with_detail_capacity(capacity))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_freshness_window(mut self, freshness_window: Duration) -> Self {
        self.freshness_window = freshness_window;
        self
    }

    /// Replaces the cache with an empty one holding at most `capacity` games.
    pub fn with_detail_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache = RwLock::new(GameCache::new(capacity));
        self
    }

    pub fn with_observer(mut self, observer: DirectoryObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    fn emit(&self, event: DirectoryEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }

    async fn fetch_remote<T, F, Fut>(&self, key: &CacheKey, request: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        fetch_with_retry(&self.retry, request, |attempt, error| {
            self.emit(DirectoryEvent::FetchAttemptFailed {
                key: key.clone(),
                attempt,
                error: error.to_string(),
            })
        })
        .await
    }

    /// Today's games with ranked streams.
    ///
    /// A snapshot younger than the freshness window is returned without any
    /// network access unless `force_refresh` is set.
    #[instrument(skip(self))]
    pub async fn get_todays_games(&self, force_refresh: bool) -> Vec<Event> {
        let key = CacheKey::TodaysGames;

        if !force_refresh {
            let cached = self
                .cache
                .read()
                .await
                .fresh_todays_games(self.freshness_window);
            if let Some(games) = cached {
                self.emit(DirectoryEvent::CacheHit { key });
                return games;
            }
            self.emit(DirectoryEvent::CacheMiss { key: key.clone() });
        }

        let requested_at = Instant::now();
        let fetched = self
            .fetch_remote(&key, || self.source.fetch_live_games())
            .await;

        match fetched {
            Ok(games) => {
                let games = prepare_events(games);
                info!(
                    "Fetched today's games from {} source: count={}",
                    self.source.name(),
                    games.len()
                );
                self.emit(DirectoryEvent::FetchSucceeded {
                    key: key.clone(),
                    count: games.len(),
                });

                let outcome = self
                    .cache
                    .write()
                    .await
                    .store_todays_games(games.clone(), requested_at);
                match outcome {
                    StoreOutcome::Stored => games,
                    StoreOutcome::DiscardedOlder => {
                        self.emit(DirectoryEvent::StaleWriteDiscarded { key });
                        self.cache.read().await.last_todays_games().unwrap_or(games)
                    }
                }
            }
            Err(e) => {
                warn!("Failed to refresh today's games: {e}");
                self.emit(DirectoryEvent::FetchExhausted {
                    key: key.clone(),
                    error: e.to_string(),
                });

                let fallback = self.cache.read().await.last_todays_games();
                match fallback {
                    Some(games) => {
                        info!("Serving last known snapshot of today's games");
                        self.emit(DirectoryEvent::ServedStale { key });
                        games
                    }
                    None => {
                        info!("No cached snapshot of today's games, returning empty list");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// A single game with ranked streams, or `None` when it is unknown.
    #[instrument(skip(self))]
    pub async fn get_game_by_id(&self, id: &str, force_refresh: bool) -> Option<Event> {
        let key = CacheKey::Game(id.to_string());

        if !force_refresh {
            let cached = self
                .cache
                .write()
                .await
                .fresh_game(id, self.freshness_window);
            if let Some(game) = cached {
                self.emit(DirectoryEvent::CacheHit { key });
                return Some(game);
            }
            self.emit(DirectoryEvent::CacheMiss { key: key.clone() });
        }

        let requested_at = Instant::now();
        let fetched = self.fetch_remote(&key, || self.source.fetch_game(id)).await;

        match fetched {
            Ok(game) => {
                let game = prepare_event(game);
                if game.id != id {
                    warn!("Backend answered game {} for requested id {}", game.id, id);
                }
                debug!("Fetched game {}: streams={}", game.id, game.streams.len());
                self.emit(DirectoryEvent::FetchSucceeded {
                    key: key.clone(),
                    count: 1,
                });

                // Keyed by the requested id so later lookups for it hit
                let outcome = self
                    .cache
                    .write()
                    .await
                    .store_game(id, game.clone(), requested_at);
                match outcome {
                    StoreOutcome::Stored => Some(game),
                    StoreOutcome::DiscardedOlder => {
                        self.emit(DirectoryEvent::StaleWriteDiscarded { key });
                        self.cache.write().await.last_game(id).or(Some(game))
                    }
                }
            }
            Err(e) if e.is_not_found() => {
                info!("Game {id} not found upstream");
                self.emit(DirectoryEvent::GameNotFound { id: id.to_string() });
                let outcome = self.cache.write().await.remove_game(id, requested_at);
                match outcome {
                    StoreOutcome::Stored => None,
                    StoreOutcome::DiscardedOlder => {
                        self.emit(DirectoryEvent::StaleWriteDiscarded { key });
                        self.cache.write().await.last_game(id)
                    }
                }
            }
            Err(e) => {
                warn!("Failed to refresh game {id}: {e}");
                self.emit(DirectoryEvent::FetchExhausted {
                    key: key.clone(),
                    error: e.to_string(),
                });

                let fallback = self.cache.write().await.last_game(id);
                if fallback.is_some() {
                    info!("Serving last known snapshot of game {id}");
                    self.emit(DirectoryEvent::ServedStale { key });
                }
                fallback
            }
        }
    }

    /// Re-fetches one game regardless of cache age, e.g. after its stream broke.
    pub async fn refresh_game_streams(&self, id: &str) -> Option<Event> {
        self.get_game_by_id(id, true).await
    }

    /// Today's games whose participants or league contain `query`, ignoring case.
    pub async fn search_games(&self, query: &str) -> Vec<Event> {
        let games = self.get_todays_games(false).await;
        search_games(&games, query)
    }

    /// Today's games narrowed by `filter` and ordered by scheduled start.
    pub async fn browse(&self, filter: &GameFilter, force_refresh: bool) -> Vec<Event> {
        let games = self.get_todays_games(force_refresh).await;
        apply_filter(&games, filter)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}

fn default_detail_capacity() -> NonZeroUsize {
    NonZeroUsize::new(cache_policy::DETAIL_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}
