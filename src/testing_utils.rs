//! Test helpers: event builders and an in-memory scripted source.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::data_fetcher::api::GameSource;
use crate::data_fetcher::directory::{DirectoryEvent, DirectoryObserver};
use crate::data_fetcher::models::{Event, EventStatus, StreamCandidate, StreamQuality};
use crate::error::AppError;

/// Test utilities for creating event data
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates an event without streams or scores
    pub fn event(id: &str, home_team: &str, away_team: &str, league: &str) -> Event {
        Event {
            id: id.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            league: league.to_string(),
            start_time: "2024-01-15T18:30:00Z".to_string(),
            status: EventStatus::Upcoming,
            home_score: None,
            away_score: None,
            home_logo: "/placeholder.svg".to_string(),
            away_logo: "/placeholder.svg".to_string(),
            streams: vec![],
        }
    }

    /// Creates a live event with a score
    pub fn live_event(id: &str, home_team: &str, away_team: &str, home: u32, away: u32) -> Event {
        Event {
            status: EventStatus::Live,
            home_score: Some(home),
            away_score: Some(away),
            ..Self::event(id, home_team, away_team, "NBA")
        }
    }

    /// Creates a stream candidate
    pub fn stream(id: &str, quality: &str, is_working: bool) -> StreamCandidate {
        StreamCandidate {
            id: id.to_string(),
            url: format!("https://streams.example.com/embed/{id}"),
            quality: StreamQuality::from(quality),
            server: format!("Stream-{id}"),
            is_working,
        }
    }

    /// Adds streams to an event
    pub fn with_streams(mut event: Event, streams: Vec<StreamCandidate>) -> Event {
        event.streams = streams;
        event
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A [`GameSource`] whose answers are scripted by the test.
///
/// The payload and reachability are captured when a call starts, so a call
/// delayed with [`ScriptedSource::push_delay`] returns what was scripted at
/// its start even if the script changes while it is in flight.
#[derive(Default)]
pub struct ScriptedSource {
    games: Mutex<Vec<Event>>,
    unreachable: AtomicBool,
    live_calls: AtomicU32,
    game_calls: AtomicU32,
    delays: Mutex<VecDeque<Duration>>,
}

impl ScriptedSource {
    pub fn new(games: Vec<Event>) -> Arc<Self> {
        Arc::new(Self {
            games: Mutex::new(games),
            ..Self::default()
        })
    }

    pub fn set_games(&self, games: Vec<Event>) {
        *lock(&self.games) = games;
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }

    /// Delays the next call (of either kind) by `delay`.
    pub fn push_delay(&self, delay: Duration) {
        lock(&self.delays).push_back(delay);
    }

    pub fn live_calls(&self) -> u32 {
        self.live_calls.load(Ordering::SeqCst)
    }

    pub fn game_calls(&self) -> u32 {
        self.game_calls.load(Ordering::SeqCst)
    }

    fn next_delay(&self) -> Option<Duration> {
        lock(&self.delays).pop_front()
    }

    async fn answer<T>(&self, outcome: Result<T, AppError>) -> Result<T, AppError> {
        if let Some(delay) = self.next_delay() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

#[async_trait]
impl GameSource for ScriptedSource {
    async fn fetch_live_games(&self) -> Result<Vec<Event>, AppError> {
        self.live_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = if self.unreachable.load(Ordering::SeqCst) {
            Err(AppError::network_connection("scripted://live-games", "unreachable"))
        } else {
            Ok(lock(&self.games).clone())
        };
        self.answer(outcome).await
    }

    async fn fetch_game(&self, id: &str) -> Result<Event, AppError> {
        self.game_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = if self.unreachable.load(Ordering::SeqCst) {
            Err(AppError::network_connection("scripted://game", "unreachable"))
        } else {
            lock(&self.games)
                .iter()
                .find(|game| game.id == id)
                .cloned()
                .ok_or_else(|| AppError::game_not_found(id))
        };
        self.answer(outcome).await
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// An observer that records every directory event it receives.
pub fn recording_observer() -> (DirectoryObserver, Arc<Mutex<Vec<DirectoryEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let observer: DirectoryObserver = Arc::new(move |event: &DirectoryEvent| {
        lock(&sink).push(event.clone());
    });
    (observer, events)
}
