/*!
 * Phrase segmentation.
 *
 * Greedily groups recognized words into subtitle phrases. Before a word is
 * appended, the segmenter checks whether it has to open a new phrase instead:
 * the phrase would get too long, the pause before the word is too long, the
 * phrase already holds the maximum number of words, or the previous word
 * closed a sentence or clause.
 */

use log::debug;

use crate::app_config::SubtitleConfig;
use super::model::{ends_with_punctuation, SubtitlePhrase, WordToken};

/// Thresholds used to decide where a phrase ends
#[derive(Debug, Clone)]
pub struct PhraseSegmenter {
    max_chars: usize,
    max_pause_secs: f64,
    max_words: usize,
}

/// Words collected for the phrase under construction
struct PhraseBuffer<'a> {
    words: Vec<&'a WordToken>,
    chars: usize,
}

impl<'a> PhraseBuffer<'a> {
    fn seeded(token: &'a WordToken) -> Self {
        Self {
            words: vec![token],
            chars: token.char_len(),
        }
    }

    fn push(&mut self, token: &'a WordToken) {
        self.chars += token.char_len();
        self.words.push(token);
    }

    fn last(&self) -> &'a WordToken {
        self.words[self.words.len() - 1]
    }

    fn into_phrase(self) -> SubtitlePhrase {
        let start = self.words[0].start;
        let end = self.last().end;
        let text = self
            .words
            .iter()
            .map(|w| w.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        SubtitlePhrase::new(start, end, finalize_text(&text))
    }
}

impl PhraseSegmenter {
    pub fn new(max_chars: usize, max_pause_secs: f64, max_words: usize) -> Self {
        Self {
            max_chars,
            max_pause_secs,
            max_words,
        }
    }

    pub fn from_config(config: &SubtitleConfig) -> Self {
        Self::new(
            config.max_chars_per_phrase,
            config.max_pause_secs,
            config.max_words_per_phrase,
        )
    }

    /// Split an ordered token stream into phrases.
    ///
    /// Tokens must be ordered by non-decreasing start time. Blank tokens are skipped.
    pub fn segment(&self, tokens: &[WordToken]) -> Vec<SubtitlePhrase> {
        let mut phrases = Vec::new();
        let mut buffer: Option<PhraseBuffer> = None;

        for token in tokens.iter().filter(|t| !t.text.trim().is_empty()) {
            buffer = match buffer.take() {
                None => Some(PhraseBuffer::seeded(token)),
                Some(current) if self.starts_new_phrase(&current, token) => {
                    phrases.push(current.into_phrase());
                    Some(PhraseBuffer::seeded(token))
                }
                Some(mut current) => {
                    current.push(token);
                    Some(current)
                }
            };
        }

        if let Some(current) = buffer {
            phrases.push(current.into_phrase());
        }

        debug!("Segmented {} tokens into {} phrases", tokens.len(), phrases.len());
        phrases
    }

    fn starts_new_phrase(&self, buffer: &PhraseBuffer, next: &WordToken) -> bool {
        let previous = buffer.last();

        buffer.chars + next.char_len() > self.max_chars
            || next.start - previous.end > self.max_pause_secs
            || buffer.words.len() >= self.max_words
            || ends_with_punctuation(previous.text.trim())
    }
}

/// Capitalize the first letter and make sure the phrase ends with punctuation
pub fn finalize_text(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let mut result = match chars.next() {
        Some(first) if first.is_alphabetic() && first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect::<String>()
        }
        Some(_) => text.to_string(),
        None => return String::new(),
    };

    if !ends_with_punctuation(&result) {
        result.push('.');
    }
    result
}
