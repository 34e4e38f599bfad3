/*!
 * Speech recognition.
 *
 * A [`SpeechRecognizer`] turns an audio file into word tokens. The
 * [`CommandRecognizer`] runs an external engine that prints its results as a
 * stream of JSON objects, which [`parser::parse_transcript`] flattens.
 */

use async_trait::async_trait;
use std::path::Path;

use crate::errors::RecognitionError;
use crate::subtitle::WordToken;

pub mod command;
pub mod parser;

pub use self::command::CommandRecognizer;
pub use self::parser::{parse_transcript, RecognitionChunk, RecognizedWord};

/// Produces timed words from an audio file
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio: &Path) -> Result<Vec<WordToken>, RecognitionError>;
}
