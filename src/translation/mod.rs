/*!
 * Translation of subtitle phrases.
 *
 * - `core`: [`TranslationService`], a cached [`Translator`] over any provider
 * - `adapter`: [`TranslationAdapter`], applies a translator to phrases and
 *   falls back to the original text on failure
 * - `cache`: in-memory translation cache
 */

use async_trait::async_trait;

use crate::errors::TranslationError;

pub mod adapter;
pub mod cache;
pub mod core;

pub use self::adapter::TranslationAdapter;
pub use self::cache::TranslationCache;
pub use self::core::TranslationService;

/// Translates one piece of text between two language codes
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;
}
