/*!
 * Scripted translation backend.
 *
 * Answers with `"[<target>] <text>"` unless told otherwise, and can be set up
 * to fail always, fail periodically, answer with nothing or answer late. Clones
 * share the request counter so a test can keep a handle after moving the
 * provider into a service.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub text: String,
}

/// How the mock answers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    Working,
    /// Every `fail_every`-th request fails with a 503
    Intermittent { fail_every: usize },
    Failing,
    /// Succeeds with an empty text
    Empty,
    /// Succeeds after `delay_ms`
    Slow { delay_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    requests: Arc<AtomicUsize>,
    responder: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(AtomicUsize::new(0)),
            responder: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Replace the default `"[<target>] <text>"` answer
    pub fn with_custom_response(mut self, responder: fn(&MockRequest) -> String) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &MockRequest) -> MockResponse {
        let text = match self.responder {
            Some(responder) => responder(request),
            None => format!("[{}] {}", request.target_language, request.text),
        };
        MockResponse { text }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn build_request(text: &str, source_language: &str, target_language: &str) -> Self::Request {
        MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let number = self.requests.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(&request)),
            MockBehavior::Intermittent { fail_every } if number % fail_every == 0 => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("scripted outage on request #{}", number),
                })
            }
            MockBehavior::Intermittent { .. } => Ok(self.answer(&request)),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "scripted failure".to_string(),
            }),
            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.answer(&request))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.behavior == MockBehavior::Failing {
            return Err(ProviderError::ConnectionError("scripted connection failure".to_string()));
        }
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
