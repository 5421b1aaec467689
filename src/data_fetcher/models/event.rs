use super::null_as_default;
use super::stream::StreamCandidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Live,
    Upcoming,
    Finished,
}

/// A sporting contest together with its candidate stream links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    pub league: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    pub status: EventStatus,
    #[serde(rename = "homeScore", default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(rename = "awayScore", default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(rename = "homeLogo", default, deserialize_with = "null_as_default")]
    pub home_logo: String,
    #[serde(rename = "awayLogo", default, deserialize_with = "null_as_default")]
    pub away_logo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streams: Vec<StreamCandidate>,
}

impl Event {
    pub fn is_live(&self) -> bool {
        self.status == EventStatus::Live
    }

    /// Parses the scheduled start. Returns `None` for anything that is not RFC 3339.
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Score line such as `98 - 92`, only when both scores are known
    pub fn score_line(&self) -> Option<String> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(format!("{home} - {away}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::StreamQuality;

    #[test]
    fn test_event_deserialization_full() {
        let json = r#"{
            "id": "1",
            "homeTeam": "Los Angeles Lakers",
            "awayTeam": "Boston Celtics",
            "league": "NBA",
            "startTime": "2024-01-15T19:30:00Z",
            "status": "live",
            "homeScore": 98,
            "awayScore": 92,
            "homeLogo": "/placeholder.svg",
            "awayLogo": "/placeholder.svg",
            "streams": [
                {"id": "1a", "url": "https://example.com/1a", "quality": "HD", "server": "Stream1", "isWorking": true}
            ]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "1");
        assert_eq!(event.status, EventStatus::Live);
        assert_eq!(event.home_score, Some(98));
        assert_eq!(event.score_line().as_deref(), Some("98 - 92"));
        assert_eq!(event.streams.len(), 1);
        assert_eq!(event.streams[0].quality, StreamQuality::Hd);
        assert!(event.is_live());
    }

    #[test]
    fn test_event_missing_optional_fields_default() {
        let json = r#"{
            "id": "2",
            "homeTeam": "Kansas City Chiefs",
            "awayTeam": "Buffalo Bills",
            "league": "NFL",
            "startTime": "2024-01-15T21:00:00Z",
            "status": "upcoming"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.home_score, None);
        assert_eq!(event.away_score, None);
        assert_eq!(event.home_logo, "");
        assert!(event.streams.is_empty());
        assert_eq!(event.score_line(), None);
    }

    #[test]
    fn test_null_logos_and_streams_default_to_empty() {
        let json = r#"{
            "id": "5",
            "homeTeam": "Arsenal",
            "awayTeam": "Chelsea",
            "league": "Soccer",
            "startTime": "2024-01-15T17:30:00Z",
            "status": "upcoming",
            "homeScore": null,
            "awayScore": null,
            "homeLogo": null,
            "awayLogo": null,
            "streams": null
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.home_logo, "");
        assert_eq!(event.away_logo, "");
        assert!(event.streams.is_empty());
        assert_eq!(event.score_line(), None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{
            "id": "3",
            "homeTeam": "A",
            "awayTeam": "B",
            "league": "MLB",
            "startTime": "2024-01-15T21:00:00Z",
            "status": "postponed"
        }"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_start_instant_parsing() {
        let mut event: Event = serde_json::from_str(
            r#"{"id":"4","homeTeam":"A","awayTeam":"B","league":"NHL",
                "startTime":"2024-01-15T18:30:00+02:00","status":"finished"}"#,
        )
        .unwrap();
        let start = event.start_instant().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-15T16:30:00+00:00");

        event.start_time = "tonight".to_string();
        assert!(event.start_instant().is_none());
    }
}
