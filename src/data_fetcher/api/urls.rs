//! URL building utilities for API endpoints

use url::Url;

use crate::constants::endpoints;
use crate::error::AppError;

/// Parses the configured backend URL.
pub fn parse_backend_url(backend_url: &str) -> Result<Url, AppError> {
    let url = Url::parse(backend_url)
        .map_err(|e| AppError::config_error(format!("Invalid backend URL '{backend_url}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::config_error(format!(
            "Backend URL '{backend_url}' cannot be used as a base URL"
        )));
    }
    Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> String {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.to_string()
}

fn endpoint_segments(endpoint: &str) -> impl Iterator<Item = &str> {
    endpoint.split('/').filter(|s| !s.is_empty())
}

/// Builds the URL of today's event collection.
///
/// # Example
/// ```
/// use live_sports_streams::data_fetcher::api::{build_live_games_url, parse_backend_url};
///
/// let base = parse_backend_url("https://streams.example.com/").unwrap();
/// assert_eq!(build_live_games_url(&base), "https://streams.example.com/api/live-games");
/// ```
pub fn build_live_games_url(base: &Url) -> String {
    let segments: Vec<&str> = endpoint_segments(endpoints::LIVE_GAMES).collect();
    with_segments(base, &segments)
}

/// Builds the URL of a single event. The id is percent-encoded as one path segment.
///
/// # Example
/// ```
/// use live_sports_streams::data_fetcher::api::{build_game_url, parse_backend_url};
///
/// let base = parse_backend_url("https://streams.example.com").unwrap();
/// assert_eq!(build_game_url(&base, "nba 42"), "https://streams.example.com/api/game/nba%2042");
/// ```
pub fn build_game_url(base: &Url, id: &str) -> String {
    let mut segments: Vec<&str> = endpoint_segments(endpoints::GAME).collect();
    segments.push(id);
    with_segments(base, &segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_live_games_url() {
        let base = parse_backend_url("https://api.example.com").unwrap();
        assert_eq!(
            build_live_games_url(&base),
            "https://api.example.com/api/live-games"
        );

        let local = parse_backend_url("http://localhost:8080/").unwrap();
        assert_eq!(
            build_live_games_url(&local),
            "http://localhost:8080/api/live-games"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let base = parse_backend_url("https://example.com/streams/").unwrap();
        assert_eq!(
            build_live_games_url(&base),
            "https://example.com/streams/api/live-games"
        );
    }

    #[test]
    fn test_build_game_url_encodes_id() {
        let base = parse_backend_url("https://api.example.com").unwrap();
        assert_eq!(build_game_url(&base, "1"), "https://api.example.com/api/game/1");
        assert_eq!(
            build_game_url(&base, "a/b?c"),
            "https://api.example.com/api/game/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_parse_backend_url_rejects_garbage() {
        assert!(matches!(
            parse_backend_url("not a url"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            parse_backend_url("mailto:someone@example.com"),
            Err(AppError::Config(_))
        ));
    }
}
