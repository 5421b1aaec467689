//! Cache data structures with TTL support

use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// An immutable snapshot together with the instant its fetch was started.
#[derive(Debug, Clone)]
pub struct CachedSnapshot<T> {
    pub data: T,
    pub cached_at: Instant,
}

impl<T> CachedSnapshot<T> {
    pub fn new(data: T, cached_at: Instant) -> Self {
        Self { data, cached_at }
    }

    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }

    /// Checks if the snapshot has reached the end of its freshness window
    pub fn is_expired(&self, freshness_window: Duration) -> bool {
        let age = self.age();
        let is_expired = age >= freshness_window;

        trace!(
            "Cache expiration check: age={:?}, window={:?}, is_expired={}",
            age, freshness_window, is_expired
        );

        is_expired
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self, freshness_window: Duration) -> Duration {
        freshness_window.saturating_sub(self.age())
    }

    /// True when a snapshot fetched at `candidate` must not replace this one.
    pub fn is_newer_than(&self, candidate: Instant) -> bool {
        self.cached_at > candidate
    }
}

/// Outcome of a cache write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    /// The slot already holds a snapshot whose fetch started later.
    DiscardedOlder,
}

/// Cache information structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub size: usize,
    pub capacity: usize,
}

/// Combined cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub todays_games_cached: bool,
    pub todays_games_age: Option<Duration>,
    pub game_details: CacheInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_expires_at_window_boundary() {
        let window = Duration::from_secs(300);
        let snapshot = CachedSnapshot::new(vec![1, 2, 3], Instant::now());
        assert!(!snapshot.is_expired(window));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(!snapshot.is_expired(window));
        assert_eq!(snapshot.time_until_expiry(window), Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(snapshot.is_expired(window));
        assert_eq!(snapshot.time_until_expiry(window), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_newer_than() {
        let earlier = Instant::now();
        tokio::time::advance(Duration::from_millis(10)).await;
        let snapshot = CachedSnapshot::new("fresh", Instant::now());

        assert!(snapshot.is_newer_than(earlier));
        assert!(!snapshot.is_newer_than(snapshot.cached_at));
    }
}
