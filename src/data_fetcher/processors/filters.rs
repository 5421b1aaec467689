//! Pure filters over an event collection. None of these touch the cache.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data_fetcher::models::Event;

/// Browse criteria for the game list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// League tag, compared case-insensitively. `None` or `"all"` disables it.
    pub league: Option<String>,
    /// Free-text query, see [`matches_query`].
    pub query: Option<String>,
    pub live_only: bool,
}

impl GameFilter {
    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = Some(league.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn live_only(mut self) -> Self {
        self.live_only = true;
        self
    }
}

/// Case-insensitive substring match over both participants and the league tag.
pub fn matches_query(event: &Event, query: &str) -> bool {
    let needle = query.to_lowercase();
    event.home_team.to_lowercase().contains(&needle)
        || event.away_team.to_lowercase().contains(&needle)
        || event.league.to_lowercase().contains(&needle)
}

pub fn search_games(games: &[Event], query: &str) -> Vec<Event> {
    games
        .iter()
        .filter(|game| matches_query(game, query))
        .cloned()
        .collect()
}

fn matches_league(event: &Event, league: &str) -> bool {
    league.eq_ignore_ascii_case("all") || event.league.eq_ignore_ascii_case(league)
}

/// Earlier start first; events whose start cannot be parsed go last.
fn compare_start(a: &Event, b: &Event) -> Ordering {
    match (a.start_instant(), b.start_instant()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Applies league, query and live filters, then orders by scheduled start.
pub fn apply_filter(games: &[Event], filter: &GameFilter) -> Vec<Event> {
    let mut filtered: Vec<Event> = games
        .iter()
        .filter(|game| {
            filter
                .league
                .as_deref()
                .is_none_or(|league| matches_league(game, league))
        })
        .filter(|game| {
            filter
                .query
                .as_deref()
                .filter(|q| !q.is_empty())
                .is_none_or(|q| matches_query(game, q))
        })
        .filter(|game| !filter.live_only || game.is_live())
        .cloned()
        .collect();

    filtered.sort_by(compare_start);
    filtered
}

pub fn live_count(games: &[Event]) -> usize {
    games.iter().filter(|game| game.is_live()).count()
}

/// Distinct league tags, deduplicated case-insensitively and sorted.
///
/// The first spelling seen for a league is the one reported.
pub fn leagues(games: &[Event]) -> Vec<String> {
    let mut by_key: BTreeMap<String, String> = BTreeMap::new();
    for game in games {
        by_key
            .entry(game.league.to_lowercase())
            .or_insert_with(|| game.league.clone());
    }
    by_key.into_values().collect()
}
