/*!
 * Translation backends.
 *
 * - `libretranslate`: HTTP client for a LibreTranslate compatible server
 * - `mock`: in-process backend with scripted behaviour, for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A backend able to translate one piece of text per request.
///
/// Request and response shapes belong to the backend; the translation service
/// only builds requests and reads text back through this trait.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    type Request: Send + Sync;
    type Response: Send + Sync;

    /// Request translating `text` from `source_language` to `target_language` (ISO codes)
    fn build_request(text: &str, source_language: &str, target_language: &str) -> Self::Request;

    /// Send a request. Implementations handle their own retries.
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Cheap reachability check
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Translated text carried by a response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod libretranslate;
pub mod mock;
