//! Single-attempt HTTP fetching with status and payload classification

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::error::AppError;

/// Performs one GET request and parses the JSON body.
///
/// Each failure is mapped to a specific [`AppError`]: transport problems,
/// non-success statuses and unparseable payloads are all reported without
/// retrying. Callers wrap this in
/// [`fetch_with_retry`](super::retry::fetch_with_retry).
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("Fetching data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::ApiFetch(e)
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    parse_payload(&response_text, url)
}

/// Parses a response body, telling apart empty, non-JSON and mis-shaped payloads.
pub(crate) fn parse_payload<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &body.chars().take(200).collect::<String>()
            );

            let trimmed = body.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else if e.is_syntax() || e.is_eof() {
                Err(AppError::api_malformed_json(e.to_string(), url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::data_fetcher::models::Event;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_payload_classification() {
        let url = "https://example.com/api/live-games";

        let empty = parse_payload::<Vec<Event>>("   ", url).unwrap_err();
        assert!(matches!(empty, AppError::ApiNoData { .. }));

        let html = parse_payload::<Vec<Event>>("<html>oops</html>", url).unwrap_err();
        assert!(matches!(html, AppError::ApiMalformedJson { .. }));

        let truncated = parse_payload::<Vec<Event>>("[{\"id\": \"1\"", url).unwrap_err();
        assert!(matches!(truncated, AppError::ApiMalformedJson { .. }));

        let wrong_shape = parse_payload::<Vec<Event>>("{\"games\": []}", url).unwrap_err();
        assert!(matches!(wrong_shape, AppError::ApiUnexpectedStructure { .. }));

        let ok = parse_payload::<Vec<Event>>("[]", url).unwrap();
        assert!(ok.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_maps_status_codes() {
        let server = MockServer::start().await;
        let client = create_test_http_client();

        let cases = [
            (404, "/missing"),
            (429, "/limited"),
            (400, "/bad"),
            (503, "/down"),
            (500, "/boom"),
        ];
        for (status, route) in cases {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }

        let url = |route: &str| format!("{}{}", server.uri(), route);

        let err = fetch::<Vec<Event>>(&client, &url("/missing")).await.unwrap_err();
        assert!(matches!(err, AppError::ApiNotFound { .. }));
        let err = fetch::<Vec<Event>>(&client, &url("/limited")).await.unwrap_err();
        assert!(matches!(err, AppError::ApiRateLimit { .. }));
        let err = fetch::<Vec<Event>>(&client, &url("/bad")).await.unwrap_err();
        assert!(matches!(err, AppError::ApiClientError { status: 400, .. }));
        let err = fetch::<Vec<Event>>(&client, &url("/down")).await.unwrap_err();
        assert!(matches!(err, AppError::ApiServiceUnavailable { status: 503, .. }));
        let err = fetch::<Vec<Event>>(&client, &url("/boom")).await.unwrap_err();
        assert!(matches!(err, AppError::ApiServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_failure() {
        // Bind and drop a listener so the port is very likely closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = create_test_http_client();
        let err = fetch::<Vec<Event>>(&client, &format!("http://{addr}/api/live-games"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::TransportFailure);
    }
}
