/*!
 * Core translation service implementation.
 *
 * [`TranslationService`] wraps a [`Provider`] with a cache and exposes it as a
 * [`Translator`].
 */

use async_trait::async_trait;
use log::{debug, info};

use crate::app_config::TranslationConfig;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::Provider;
use super::cache::TranslationCache;
use super::Translator;

/// Translation service for subtitle phrases
pub struct TranslationService<P: Provider> {
    /// Provider implementation
    provider: P,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,
}

impl TranslationService<LibreTranslate> {
    /// Create the production service from configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        info!("Using translation backend at {}", config.endpoint);
        Self::new(LibreTranslate::from_config(config), config.enable_cache)
    }
}

impl<P: Provider> TranslationService<P> {
    pub fn new(provider: P, enable_cache: bool) -> Self {
        Self {
            provider,
            cache: TranslationCache::new(enable_cache),
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate a text, consulting the cache first
    pub async fn translate_text(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        if let Some(cached) = self.cache.get(text, source, target) {
            return Ok(cached);
        }

        let request = P::build_request(text, source, target);
        let response = self.provider.complete(request).await?;
        let translated = P::extract_text(&response).trim().to_string();

        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        debug!("Translated '{}' -> '{}'", text, translated);
        self.cache.store(text, source, target, &translated);
        Ok(translated)
    }
}

#[async_trait]
impl<P: Provider> Translator for TranslationService<P> {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        self.translate_text(text, source, target).await
    }
}
