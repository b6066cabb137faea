//! HTTP implementation of [`TravelApi`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::core::config::ApiConfig;

use super::api::TravelApi;
use super::error::{ApiError, ApiResult};
use super::query::{RateSelection, SearchRequest};
use super::wire::{
    ConfirmationReply, Hotel, HotelPage, PlacePredictions, PlaceSuggestion, QuoteStatusReport,
    QuoteTicket,
};

const AUTOCOMPLETE_PATH: &str = "/api/v1/hotels/places/autocomplete";
const AVAILABILITY_PATH: &str = "/api/v1/hotels/availability";
const QUOTE_PATH: &str = "/api/v1/booking/quote";

/// Travel API client over `reqwest`.
///
/// Context headers (`X-Market`, `X-Language`, `X-Currency`,
/// `X-Country-Code`) and the optional bearer token are attached to every
/// request.
#[derive(Debug, Clone)]
pub struct TravelApiClient {
    http: Client,
    base_url: String,
}

impl TravelApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in [
            ("x-market", &config.market),
            ("x-language", &config.language),
            ("x-currency", &config.currency),
            ("x-country-code", &config.country_code),
        ] {
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Client(format!("invalid {name} header: {e}")))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| ApiError::Client("invalid API key".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Client(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = Self::check_status(response).await?;

        let bytes = response.bytes().await?;
        debug!(%method, path, "API response received: {} bytes", bytes.len());

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::invalid_response(format!("JSON parse error: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Map non-2xx responses onto [`ApiError`] without leaking raw bodies.
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting and server errors (retryable)
        if status.as_u16() == 429 || status.is_server_error() {
            warn!("Upstream unavailable: {}", status);
            return Err(ApiError::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(&body)
            .unwrap_or_else(|| format!("request rejected with status {}", status.as_u16()));
        Err(ApiError::rejected(status.as_u16(), message))
    }
}

/// Extracts a human-readable reason from an error body.
fn rejection_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "reason", "detail"]
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl TravelApi for TravelApiClient {
    #[instrument(skip(self))]
    async fn autocomplete_places(
        &self,
        query: &str,
        language: &str,
    ) -> ApiResult<Vec<PlaceSuggestion>> {
        let body = serde_json::json!({ "input": query, "language": language });
        let reply: PlacePredictions = self.post(AUTOCOMPLETE_PATH, &body).await?;
        Ok(reply.predictions)
    }

    #[instrument(skip(self, request))]
    async fn search_offers(&self, request: &SearchRequest) -> ApiResult<HotelPage> {
        self.post(AVAILABILITY_PATH, &request.body()).await
    }

    #[instrument(skip(self))]
    async fn load_more(&self, session_id: &str) -> ApiResult<HotelPage> {
        let body = serde_json::json!({ "session_id": session_id });
        self.post(&format!("{AVAILABILITY_PATH}/load_more"), &body)
            .await
    }

    #[instrument(skip(self))]
    async fn hotel_details(&self, session_id: &str, hotel_id: &str) -> ApiResult<Hotel> {
        self.get(&format!("{AVAILABILITY_PATH}/{session_id}/{hotel_id}"))
            .await
    }

    #[instrument(skip(self))]
    async fn request_quote(&self, selection: &RateSelection) -> ApiResult<QuoteTicket> {
        self.post(&format!("{QUOTE_PATH}/schedule"), &selection.quote_body())
            .await
    }

    #[instrument(skip(self))]
    async fn quote_status(&self, quote_id: &str) -> ApiResult<QuoteStatusReport> {
        self.get(&format!("{QUOTE_PATH}/pull/{quote_id}")).await
    }

    #[instrument(skip(self))]
    async fn confirm_booking(&self, quote_id: &str) -> ApiResult<ConfirmationReply> {
        self.post(
            &format!("{QUOTE_PATH}/{quote_id}/confirm"),
            &serde_json::json!({}),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one HTTP response and hands back the raw request.
    async fn one_shot(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&received) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + length
    }

    fn client(base_url: String) -> TravelApiClient {
        TravelApiClient::new(&ApiConfig {
            base_url,
            api_key: Some("secret".to_string()),
            timeout_secs: 5,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_quote_request_sends_context_headers() {
        let (url, server) = one_shot("200 OK", r#"{"reference":"q-77"}"#).await;

        let ticket = client(url)
            .request_quote(&RateSelection::new("s-1", "h-2", "r-3"))
            .await
            .unwrap();
        assert_eq!(ticket.reference, "q-77");

        let raw = server.await.unwrap().to_lowercase();
        assert!(raw.starts_with("post /api/v1/booking/quote/schedule"));
        assert!(raw.contains("x-market: fr"));
        assert!(raw.contains("x-currency: eur"));
        assert!(raw.contains("authorization: bearer secret"));
        assert!(raw.contains("\"search_session_id\":\"s-1\""));
    }

    #[tokio::test]
    async fn test_rejection_carries_upstream_reason() {
        let (url, _server) = one_shot("409 Conflict", r#"{"message":"sold out"}"#).await;

        let err = client(url)
            .request_quote(&RateSelection::new("s", "h", "r"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 409, .. }));
        assert_eq!(err.to_string(), "sold out");
    }

    #[tokio::test]
    async fn test_server_errors_are_transient() {
        let (url, _server) = one_shot("503 Service Unavailable", "<html>busy</html>").await;

        let err = client(url).quote_status("q-1").await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable { status: 503 }));
        assert!(err.is_transient());
        assert!(!err.to_string().contains("busy"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (url, _server) = one_shot("200 OK", "not json").await;

        let err = client(url).quote_status("q-1").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_refused_connection_is_transient() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}"))
            .load_more("s-1")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_rejection_message_extraction() {
        assert_eq!(
            rejection_message(r#"{"error":" Rate unavailable "}"#).as_deref(),
            Some("Rate unavailable")
        );
        assert_eq!(rejection_message("<html/>"), None);
        assert_eq!(rejection_message(r#"{"message":""}"#), None);
    }

    #[tokio::test]
    #[ignore = "requires network access to the travel API"]
    async fn test_live_autocomplete() {
        let client = TravelApiClient::new(&ApiConfig::default()).unwrap();
        let places = client.autocomplete_places("Paris", "en").await.unwrap();
        assert!(!places.is_empty());
    }
}
