use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use super::Provider;

/// Client for a LibreTranslate compatible `/translate` endpoint
#[derive(Debug)]
pub struct LibreTranslate {
    /// Full URL of the translate endpoint
    endpoint: String,
    /// Optional API key, omitted from requests when empty
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Translate request body
#[derive(Debug, Clone, Serialize)]
pub struct LibreTranslateRequest {
    /// Text to translate
    pub q: String,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
    /// Input format, always `text` for subtitles
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl LibreTranslateRequest {
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: text.into(),
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
            api_key: None,
        }
    }
}

/// Translate response body
#[derive(Debug, Clone, Deserialize)]
pub struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateErrorBody {
    error: String,
}

impl LibreTranslate {
    /// Create a new client with retry configuration
    pub fn new_with_config(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let api_key = api_key.into();
        Self {
            endpoint: endpoint.into(),
            api_key: (!api_key.is_empty()).then_some(api_key),
            client: Client::builder()
                .timeout(timeout)
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new_with_config(
            &config.endpoint,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
            config.retry_count,
            config.retry_backoff_ms,
        )
    }

    async fn error_message(response: reqwest::Response) -> String {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        serde_json::from_str::<LibreTranslateErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text)
    }

    async fn send_once(&self, request: &LibreTranslateRequest) -> Result<LibreTranslateResponse, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        response
            .json::<LibreTranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Delay before the given retry (1-based), saturating instead of overflowing
    fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(factor))
    }

    fn is_retryable(error: &ProviderError) -> bool {
        match error {
            ProviderError::ConnectionError(_) | ProviderError::RequestFailed(_) => true,
            ProviderError::ApiError { status_code, .. } => {
                *status_code == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status_code >= 500
            }
            ProviderError::ParseError(_) => false,
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    type Request = LibreTranslateRequest;
    type Response = LibreTranslateResponse;

    fn build_request(text: &str, source_language: &str, target_language: &str) -> Self::Request {
        LibreTranslateRequest::new(text, source_language, target_language)
    }

    /// Send a translate request, retrying server and network errors with exponential backoff
    async fn complete(&self, mut request: Self::Request) -> Result<Self::Response, ProviderError> {
        if request.api_key.is_none() {
            request.api_key = self.api_key.clone();
        }

        let mut attempt = 0;
        loop {
            match self.send_once(&request).await {
                Ok(response) => return Ok(response),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    error!("Translation request failed: {} - attempt {}/{}", e, attempt, self.max_retries + 1);
                    tokio::time::sleep(Self::backoff_delay(self.backoff_base_ms, attempt)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Checks reachability through the `languages` listing next to the translate endpoint
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = Url::parse(&self.endpoint)
            .and_then(|u| u.join("languages"))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;
        debug!("Testing translation backend at {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: Self::error_message(response).await,
            })
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.translated_text.clone()
    }
}
