use thiserror::Error;

/// Coarse classification of fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    HttpError,
    ParseFailure,
    FetchExhausted,
    NotFound,
    Other,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("Game not found: {id}")]
    GameNotFound { id: String },

    #[error("Fetch failed after {attempts} attempts: {source}")]
    FetchExhausted {
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a game not found error
    pub fn game_not_found(id: impl Into<String>) -> Self {
        Self::GameNotFound { id: id.into() }
    }

    /// Wrap the last failure of a spent retry budget
    pub fn fetch_exhausted(attempts: u32, last: AppError) -> Self {
        Self::FetchExhausted {
            attempts,
            source: Box::new(last),
        }
    }

    /// Classify the error into the fetch failure kinds the directory reasons about
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ApiFetch(_)
            | AppError::NetworkTimeout { .. }
            | AppError::NetworkConnection { .. } => ErrorKind::TransportFailure,
            AppError::ApiNotFound { .. }
            | AppError::ApiServerError { .. }
            | AppError::ApiClientError { .. }
            | AppError::ApiRateLimit { .. }
            | AppError::ApiServiceUnavailable { .. } => ErrorKind::HttpError,
            AppError::ApiParse(_)
            | AppError::ApiMalformedJson { .. }
            | AppError::ApiUnexpectedStructure { .. }
            | AppError::ApiNoData { .. } => ErrorKind::ParseFailure,
            AppError::FetchExhausted { .. } => ErrorKind::FetchExhausted,
            AppError::GameNotFound { .. } => ErrorKind::NotFound,
            AppError::Io(_)
            | AppError::TomlSerialize(_)
            | AppError::TomlDeserialize(_)
            | AppError::Config(_)
            | AppError::LogSetup(_) => ErrorKind::Other,
        }
    }

    /// Check if another attempt may succeed (transport, status and payload failures)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TransportFailure | ErrorKind::HttpError | ErrorKind::ParseFailure
        )
    }

    /// Check if the requested game does not exist upstream
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::GameNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid backend URL");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: Invalid backend URL");
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal Server Error", "https://example.com/api");
        assert!(matches!(error, AppError::ApiServerError { .. }));
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal Server Error (URL: https://example.com/api)"
        );
    }

    #[test]
    fn test_network_connection_helper() {
        let error = AppError::network_connection("https://example.com", "connection refused");
        assert_eq!(
            error.to_string(),
            "Connection failed to: https://example.com - connection refused"
        );
    }

    #[test]
    fn test_game_not_found_helper() {
        let error = AppError::game_not_found("42");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Game not found: 42");
    }

    #[test]
    fn test_fetch_exhausted_carries_last_cause() {
        let error = AppError::fetch_exhausted(3, AppError::network_timeout("https://example.com"));
        assert_eq!(error.kind(), ErrorKind::FetchExhausted);
        assert_eq!(
            error.to_string(),
            "Fetch failed after 3 attempts: Network timeout while fetching data from: https://example.com"
        );

        let source = std::error::Error::source(&error).expect("exhausted error has a source");
        assert_eq!(
            source.to_string(),
            "Network timeout while fetching data from: https://example.com"
        );
    }

    #[test]
    fn test_error_kinds() {
        let cases = vec![
            (AppError::network_timeout("u"), ErrorKind::TransportFailure),
            (AppError::network_connection("u", "refused"), ErrorKind::TransportFailure),
            (AppError::api_not_found("u"), ErrorKind::HttpError),
            (AppError::api_client_error(400, "bad request", "u"), ErrorKind::HttpError),
            (AppError::api_rate_limit("slow down", "u"), ErrorKind::HttpError),
            (AppError::api_service_unavailable(503, "down", "u"), ErrorKind::HttpError),
            (AppError::api_malformed_json("bad", "u"), ErrorKind::ParseFailure),
            (AppError::api_unexpected_structure("bad", "u"), ErrorKind::ParseFailure),
            (AppError::api_no_data("empty", "u"), ErrorKind::ParseFailure),
            (AppError::game_not_found("1"), ErrorKind::NotFound),
            (AppError::config_error("x"), ErrorKind::Other),
        ];

        for (error, expected) in cases {
            assert_eq!(error.kind(), expected, "unexpected kind for {error:?}");
        }
    }

    #[test]
    fn test_retryable_errors() {
        let retryable = vec![
            AppError::network_timeout("u"),
            AppError::network_connection("u", "reset"),
            AppError::api_server_error(500, "boom", "u"),
            AppError::api_client_error(400, "bad", "u"),
            AppError::api_malformed_json("bad", "u"),
        ];
        for error in retryable {
            assert!(error.is_retryable(), "Error {error:?} should be retryable");
        }

        let terminal = vec![
            AppError::game_not_found("7"),
            AppError::fetch_exhausted(3, AppError::network_timeout("u")),
            AppError::config_error("invalid config"),
        ];
        for error in terminal {
            assert!(!error.is_retryable(), "Error {error:?} should not be retryable");
        }
    }
}
