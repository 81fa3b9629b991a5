use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client as HttpClient;
use tracing::{debug, error};

use super::models::{ApiError, KlineRequest, KlineResponse};
use crate::api::PriceFeed;
use crate::models::Series;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// alltick.co kline client
pub struct AlltickClient {
    http_client: HttpClient,
    base_url: String,
    code: String,
}

impl AlltickClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://alltick.co/quote/kline";

    /// Create a new client for an instrument code such as `XAUCNH`
    pub fn new(code: String) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string(), code)
    }

    /// Create a new client with custom endpoint URL (for testing)
    pub fn with_base_url(base_url: String, code: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            code,
        }
    }

    /// The endpoint only answers requests that look like they come from its site
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static("https://alltick.co/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://alltick.co/"));
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers
    }

    /// POST /quote/kline
    ///
    /// Fetches the latest `num_points` candles of `kline_type` (1 = one minute).
    /// The envelope is returned as-is; see [`KlineResponse::into_series`].
    pub async fn get_klines(&self, num_points: u32, kline_type: u32) -> Result<KlineResponse, ApiError> {
        let body = KlineRequest::latest(&self.code, num_points, kline_type);

        let response = self
            .http_client
            .post(&self.base_url)
            .headers(Self::create_headers())
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Http(status.as_u16(), body_text));
        }

        response
            .json::<KlineResponse>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PriceFeed for AlltickClient {
    async fn fetch(&self, num_points: u32, kline_type: u32) -> Result<Series, ApiError> {
        let result = self
            .get_klines(num_points, kline_type)
            .await
            .and_then(KlineResponse::into_series);

        match &result {
            Ok(series) => debug!(
                "Fetched {} samples (kline_type: {}, num: {})",
                series.len(),
                kline_type,
                num_points
            ),
            Err(e) => error!(
                "API error or no data (kline_type: {}, num: {}): {}",
                kline_type, num_points, e
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AlltickClient {
        AlltickClient::with_base_url(format!("{}/quote/kline", server.uri()), "XAUCNH".to_string())
    }

    #[test]
    fn test_new_uses_default_endpoint() {
        let client = AlltickClient::new("XAUCNH".to_string());
        assert_eq!(client.base_url, AlltickClient::DEFAULT_BASE_URL);
        assert_eq!(client.code, "XAUCNH");
    }

    #[tokio::test]
    async fn test_fetch_series() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quote/kline"))
            .and(header("Referer", "https://alltick.co/"))
            .and(body_partial_json(json!({
                "data": {"code": "XAUCNH", "kline_type": "1", "query_kline_num": "2"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ret": 200,
                "msg": "ok",
                "data": {"kline_list": [
                    {"timestamp": "1700000000", "close_price": "3110.34768"},
                    {"timestamp": "1700000060", "close_price": "3265.865064"}
                ]}
            })))
            .mount(&server)
            .await;

        let series = client_for(&server).fetch(2, 1).await.unwrap();

        assert_eq!(series.len(), 2);
        assert!((series.prices()[1] - 105.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(50, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(503, ref body) if body == "maintenance"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(50, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ret": 401, "msg": "denied"})))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(50, 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream { ret: 401, .. }));
    }
}
