//! Remote data source seam and its HTTP implementation

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_game_url, build_live_games_url, parse_backend_url};
use crate::data_fetcher::models::Event;
use crate::error::AppError;

/// Where the directory gets its events from.
///
/// Each call is a single attempt; retrying is the caller's business.
#[async_trait]
pub trait GameSource: Send + Sync {
    /// All of today's events, as served by the backend.
    async fn fetch_live_games(&self) -> Result<Vec<Event>, AppError>;

    /// One event. Fails with [`AppError::GameNotFound`] when the backend does not know it.
    async fn fetch_game(&self, id: &str) -> Result<Event, AppError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Reads events from the custom backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGameSource {
    client: Client,
    base_url: Url,
}

impl HttpGameSource {
    pub fn new(client: Client, backend_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            client,
            base_url: parse_backend_url(backend_url)?,
        })
    }

    /// Builds a source with its own HTTP client using the given request timeout.
    pub fn with_timeout(backend_url: &str, timeout_seconds: u64) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Self::new(client, backend_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl GameSource for HttpGameSource {
    #[instrument(skip(self), fields(source = %self.base_url))]
    async fn fetch_live_games(&self) -> Result<Vec<Event>, AppError> {
        let url = build_live_games_url(&self.base_url);
        let games: Vec<Event> = fetch(&self.client, &url).await?;
        info!("Fetched {} games from {}", games.len(), url);
        Ok(games)
    }

    #[instrument(skip(self), fields(source = %self.base_url))]
    async fn fetch_game(&self, id: &str) -> Result<Event, AppError> {
        let url = build_game_url(&self.base_url, id);
        match fetch::<Event>(&self.client, &url).await {
            Ok(event) => Ok(event),
            Err(AppError::ApiNotFound { .. }) => Err(AppError::game_not_found(id)),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
