use log::{debug, warn};
use serde::Deserialize;

use crate::errors::RecognitionError;
use crate::subtitle::WordToken;

// @module: Recognition engine output parsing

/// One word in a recognition result
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub conf: Option<f64>,
}

/// One result object emitted by the engine. Chunks without `result` carry no words.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionChunk {
    #[serde(default)]
    pub result: Vec<RecognizedWord>,
    #[serde(default)]
    pub text: String,
}

impl From<RecognizedWord> for WordToken {
    fn from(word: RecognizedWord) -> Self {
        WordToken::new(word.word, word.start, word.end)
    }
}

/// Flatten a stream of concatenated JSON chunks into word tokens, in order.
///
/// Parsing stops at the first malformed chunk; words read before it are kept.
/// A stream that fails before yielding any chunk is an error.
pub fn parse_transcript(output: &str) -> Result<Vec<WordToken>, RecognitionError> {
    let mut tokens = Vec::new();
    let mut chunks = 0usize;

    let stream = serde_json::Deserializer::from_str(output).into_iter::<RecognitionChunk>();
    for chunk in stream {
        match chunk {
            Ok(chunk) => {
                chunks += 1;
                tokens.extend(chunk.result.into_iter().map(WordToken::from));
            }
            Err(e) if chunks == 0 => return Err(RecognitionError::Parse(e.to_string())),
            Err(e) => {
                warn!("Ignoring malformed recognition output after {} chunks: {}", chunks, e);
                break;
            }
        }
    }

    debug!("Parsed {} words from {} recognition chunks", tokens.len(), chunks);
    Ok(tokens)
}
