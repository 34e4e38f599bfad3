use log::{debug, warn};
use std::sync::Arc;

use crate::language_utils::language_codes_match;
use crate::subtitle::SubtitlePhrase;
use super::Translator;

// @module: Phrase-level translation with fallback

/// Applies a [`Translator`] to phrases.
///
/// A failed translation never fails the run: the phrase keeps its original text.
#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translate every phrase text; timing and style are untouched
    pub async fn translate_phrases(
        &self,
        phrases: Vec<SubtitlePhrase>,
        source: &str,
        target: &str,
    ) -> Vec<SubtitlePhrase> {
        if language_codes_match(source, target) {
            debug!("Source and target language are both '{}', skipping translation", source);
            return phrases;
        }

        let mut translated = Vec::with_capacity(phrases.len());
        let mut failures = 0usize;

        for phrase in phrases {
            match self.translator.translate(&phrase.text, source, target).await {
                Ok(text) => translated.push(SubtitlePhrase { text, ..phrase }),
                Err(e) => {
                    failures += 1;
                    warn!("Keeping original text for '{}': {}", phrase.text, e);
                    translated.push(phrase);
                }
            }
        }

        if failures > 0 {
            warn!("{} of {} phrases were left untranslated", failures, translated.len());
        }
        translated
    }
}
