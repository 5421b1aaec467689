//! Per-directory cache of today's games and individually fetched games

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::types::{CacheInfo, CacheStats, CachedSnapshot, StoreOutcome};
use crate::data_fetcher::models::Event;

/// Cache state owned by one directory instance.
///
/// Expired entries are never evicted here: they stay available as a fallback
/// when a refresh fails. Only writes and explicit clears replace them, apart
/// from LRU eviction once the per-game capacity is reached.
#[derive(Debug)]
pub struct GameCache {
    todays_games: Option<CachedSnapshot<Vec<Event>>>,
    game_details: LruCache<String, CachedSnapshot<Event>>,
}

impl GameCache {
    pub fn new(detail_capacity: NonZeroUsize) -> Self {
        Self {
            todays_games: None,
            game_details: LruCache::new(detail_capacity),
        }
    }

    /// Returns today's games if the snapshot is still within the freshness window
    pub fn fresh_todays_games(&self, freshness_window: Duration) -> Option<Vec<Event>> {
        match &self.todays_games {
            Some(entry) if !entry.is_expired(freshness_window) => {
                debug!(
                    "Cache hit for today's games: count={}, expires_in={:?}",
                    entry.data.len(),
                    entry.time_until_expiry(freshness_window)
                );
                Some(entry.data.clone())
            }
            Some(entry) => {
                debug!("Today's games snapshot is stale: age={:?}", entry.age());
                None
            }
            None => {
                debug!("Cache miss for today's games");
                None
            }
        }
    }

    /// Returns the last stored snapshot regardless of age
    pub fn last_todays_games(&self) -> Option<Vec<Event>> {
        self.todays_games.as_ref().map(|entry| entry.data.clone())
    }

    #[instrument(skip(self, games), fields(count = games.len()))]
    pub fn store_todays_games(&mut self, games: Vec<Event>, fetched_at: Instant) -> StoreOutcome {
        if let Some(existing) = &self.todays_games
            && existing.is_newer_than(fetched_at)
        {
            warn!(
                "Discarding today's games response older than cached snapshot (cached age={:?})",
                existing.age()
            );
            return StoreOutcome::DiscardedOlder;
        }

        info!("Caching today's games: count={}", games.len());
        self.todays_games = Some(CachedSnapshot::new(games, fetched_at));
        StoreOutcome::Stored
    }

    /// Returns a cached game if it is still within the freshness window
    pub fn fresh_game(&mut self, id: &str, freshness_window: Duration) -> Option<Event> {
        match self.game_details.get(id) {
            Some(entry) if !entry.is_expired(freshness_window) => {
                debug!("Cache hit for game: id={}, age={:?}", id, entry.age());
                Some(entry.data.clone())
            }
            Some(entry) => {
                debug!("Cached game is stale: id={}, age={:?}", id, entry.age());
                None
            }
            None => {
                debug!("Cache miss for game: id={id}");
                None
            }
        }
    }

    /// Returns the last stored snapshot of a game regardless of age
    pub fn last_game(&mut self, id: &str) -> Option<Event> {
        self.game_details.get(id).map(|entry| entry.data.clone())
    }

    /// Stores a game under the id it was requested with
    #[instrument(skip(self, event))]
    pub fn store_game(&mut self, id: &str, event: Event, fetched_at: Instant) -> StoreOutcome {
        if let Some(existing) = self.game_details.peek(id)
            && existing.is_newer_than(fetched_at)
        {
            warn!("Discarding game response older than cached snapshot: id={id}");
            return StoreOutcome::DiscardedOlder;
        }

        debug!("Caching game: id={}, streams={}", id, event.streams.len());
        self.game_details
            .put(id.to_string(), CachedSnapshot::new(event, fetched_at));
        StoreOutcome::Stored
    }

    /// Drops a game that upstream reported as missing, unless a newer snapshot already landed
    pub fn remove_game(&mut self, id: &str, requested_at: Instant) -> StoreOutcome {
        match self.game_details.peek(id) {
            Some(existing) if existing.is_newer_than(requested_at) => StoreOutcome::DiscardedOlder,
            Some(_) => {
                info!("Removing cached game no longer known upstream: id={id}");
                self.game_details.pop(id);
                StoreOutcome::Stored
            }
            None => StoreOutcome::Stored,
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            todays_games_cached: self.todays_games.is_some(),
            todays_games_age: self.todays_games.as_ref().map(|entry| entry.age()),
            game_details: CacheInfo {
                size: self.game_details.len(),
                capacity: self.game_details.cap().get(),
            },
        }
    }

    pub fn clear(&mut self) {
        self.todays_games = None;
        self.game_details.clear();
    }
}
