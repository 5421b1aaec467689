//! Stream candidate ranking and selection

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::data_fetcher::models::{Event, StreamCandidate};

/// Produces the display ordering of an event's stream candidates.
///
/// Candidates that are not working are dropped; the rest are ordered by
/// quality rank, highest first. `sort_by` is stable, so candidates of equal
/// rank keep the order they arrived in. Applying this to its own output
/// returns the same list.
pub fn normalize(streams: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
    let total = streams.len();
    let mut working: Vec<StreamCandidate> = streams.into_iter().filter(|s| s.is_working).collect();
    working.sort_by(|a, b| b.quality.rank().cmp(&a.quality.rank()));

    debug!(
        "Normalized streams: kept {} of {} candidates",
        working.len(),
        total
    );
    working
}

/// Removes candidates whose id was already seen, keeping the first occurrence.
pub fn dedup_streams(event_id: &str, streams: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
    let mut seen = HashSet::new();
    streams
        .into_iter()
        .filter(|stream| {
            let fresh = seen.insert(stream.id.clone());
            if !fresh {
                warn!(
                    "Dropping duplicate stream id {} in event {}",
                    stream.id, event_id
                );
            }
            fresh
        })
        .collect()
}

/// Full per-event transform applied before anything is cached.
///
/// Broken candidates are dropped before ids are deduplicated, so a broken
/// entry never hides a working one that shares its id.
pub fn prepare_event(mut event: Event) -> Event {
    let working: Vec<StreamCandidate> = std::mem::take(&mut event.streams)
        .into_iter()
        .filter(|s| s.is_working)
        .collect();
    event.streams = normalize(dedup_streams(&event.id, working));
    event
}

/// Applies [`prepare_event`] to a collection and drops repeated event ids.
pub fn prepare_events(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| {
            let fresh = seen.insert(event.id.clone());
            if !fresh {
                warn!("Dropping duplicate event id {}", event.id);
            }
            fresh
        })
        .map(prepare_event)
        .collect()
}

/// The stream to open by default: the best-ranked working candidate.
pub fn select_default_stream(event: &Event) -> Option<&StreamCandidate> {
    event.streams.iter().find(|s| s.is_working)
}

/// Picks the stream to keep playing after the event was refreshed.
///
/// The current candidate is kept when it is still listed and working,
/// otherwise playback moves to the default stream.
pub fn failover_stream<'a>(event: &'a Event, current_id: &str) -> Option<&'a StreamCandidate> {
    event
        .streams
        .iter()
        .find(|s| s.id == current_id && s.is_working)
        .or_else(|| select_default_stream(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{EventStatus, StreamQuality};

    fn stream(id: &str, quality: &str, is_working: bool) -> StreamCandidate {
        StreamCandidate {
            id: id.to_string(),
            url: format!("https://example.com/embed/{id}"),
            quality: StreamQuality::from(quality),
            server: format!("Server-{id}"),
            is_working,
        }
    }

    fn event_with(streams: Vec<StreamCandidate>) -> Event {
        Event {
            id: "1".to_string(),
            home_team: "Los Angeles Lakers".to_string(),
            away_team: "Boston Celtics".to_string(),
            league: "NBA".to_string(),
            start_time: "2024-01-15T19:30:00Z".to_string(),
            status: EventStatus::Live,
            home_score: Some(98),
            away_score: Some(92),
            home_logo: String::new(),
            away_logo: String::new(),
            streams,
        }
    }

    fn ids(streams: &[StreamCandidate]) -> Vec<&str> {
        streams.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_normalize_drops_broken_and_ranks_by_quality() {
        let streams = vec![
            stream("hd", "HD", true),
            stream("sd", "SD", false),
            stream("fhd", "FHD", true),
        ];
        let normalized = normalize(streams);
        assert_eq!(ids(&normalized), vec!["fhd", "hd"]);
    }

    #[test]
    fn test_normalize_keeps_source_order_for_equal_ranks() {
        let streams = vec![
            stream("a", "HD", true),
            stream("b", "SD", true),
            stream("c", "HD", true),
            stream("d", "mystery", true),
            stream("e", "hd", true),
            stream("f", "720p", true),
        ];
        let normalized = normalize(streams);
        assert_eq!(ids(&normalized), vec!["a", "c", "e", "b", "d", "f"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let streams = vec![
            stream("1", "SD", true),
            stream("2", "FHD", false),
            stream("3", "HD", true),
            stream("4", "FHD", true),
            stream("5", "HD", true),
        ];
        let once = normalize(streams);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_empty_and_all_broken() {
        assert!(normalize(vec![]).is_empty());
        assert!(normalize(vec![stream("x", "HD", false)]).is_empty());
    }

    #[test]
    fn test_prepare_events_dedups_ids() {
        let mut first = event_with(vec![
            stream("a", "SD", true),
            stream("a", "FHD", true),
            stream("b", "HD", true),
        ]);
        first.id = "dup".to_string();
        let mut second = first.clone();
        second.home_team = "Someone Else".to_string();

        let prepared = prepare_events(vec![first, second]);
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].home_team, "Los Angeles Lakers");
        // The second "a" (FHD) is discarded, so HD outranks the surviving SD "a".
        assert_eq!(ids(&prepared[0].streams), vec!["b", "a"]);
    }

    #[test]
    fn test_broken_duplicate_does_not_hide_working_stream() {
        let event = prepare_event(event_with(vec![
            stream("a", "FHD", false),
            stream("b", "SD", true),
            stream("a", "FHD", true),
        ]));
        assert_eq!(ids(&event.streams), vec!["a", "b"]);
        assert!(event.streams.iter().all(|s| s.is_working));
    }

    #[test]
    fn test_select_default_stream() {
        let event = prepare_event(event_with(vec![
            stream("hd", "HD", true),
            stream("fhd", "FHD", true),
        ]));
        assert_eq!(select_default_stream(&event).map(|s| s.id.as_str()), Some("fhd"));

        let empty = event_with(vec![]);
        assert!(select_default_stream(&empty).is_none());
    }

    #[test]
    fn test_failover_keeps_current_when_still_working() {
        let event = prepare_event(event_with(vec![
            stream("fhd", "FHD", true),
            stream("hd", "HD", true),
        ]));
        assert_eq!(failover_stream(&event, "hd").map(|s| s.id.as_str()), Some("hd"));
    }

    #[test]
    fn test_failover_moves_to_best_when_current_disappears() {
        let event = prepare_event(event_with(vec![
            stream("hd", "HD", true),
            stream("gone", "FHD", false),
        ]));
        assert_eq!(failover_stream(&event, "gone").map(|s| s.id.as_str()), Some("hd"));
        assert_eq!(failover_stream(&event, "unknown").map(|s| s.id.as_str()), Some("hd"));
    }
}
