/*!
 * Mock pipeline collaborators
 *
 * In-process stand-ins for ffmpeg, the recognition engine and the translation
 * backend. They write the same artifacts the real tools would, so temp file
 * handling can be observed.
 */

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use subforge::errors::{ProviderError, RecognitionError, ToolError, TranslationError};
use subforge::media::{AudioExtractor, Compositor};
use subforge::pipeline::{Collaborators, ErrorSink, PipelineState, ProgressSink};
use subforge::speech::SpeechRecognizer;
use subforge::subtitle::WordToken;
use subforge::translation::Translator;

/// Writes a fake WAV file, or fails like a missing ffmpeg
#[derive(Debug, Default)]
pub struct MockExtractor {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockExtractor {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }
}

#[async_trait]
impl AudioExtractor for MockExtractor {
    async fn extract(&self, _video: &Path, audio_out: &Path) -> Result<(), ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ToolError::Failed {
                tool: "audio extraction".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "Invalid data found when processing input".to_string(),
            });
        }
        fs::write(audio_out, b"RIFF....WAVE").map_err(|e| ToolError::Unavailable {
            tool: "audio extraction".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns fixed tokens, optionally after a delay or with an error
#[derive(Debug, Default)]
pub struct MockRecognizer {
    pub tokens: Vec<WordToken>,
    pub fail: bool,
    pub delay: Option<Duration>,
    /// Whether the audio file existed when recognition started
    pub saw_audio: Mutex<Option<bool>>,
}

impl MockRecognizer {
    pub fn with_tokens(tokens: Vec<WordToken>) -> Self {
        Self { tokens, ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn slow(tokens: Vec<WordToken>, delay: Duration) -> Self {
        Self { tokens, delay: Some(delay), ..Self::default() }
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(&self, audio: &Path) -> Result<Vec<WordToken>, RecognitionError> {
        *self.saw_audio.lock().unwrap() = Some(audio.exists());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RecognitionError::Engine("model could not be loaded".to_string()));
        }
        Ok(self.tokens.clone())
    }
}

/// Copies the subtitle script into the output "video" and keeps a copy for assertions
#[derive(Debug, Default)]
pub struct MockCompositor {
    pub fail: bool,
    pub script: Mutex<Option<String>>,
    pub output: Mutex<Option<PathBuf>>,
}

impl MockCompositor {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn script(&self) -> Option<String> {
        self.script.lock().unwrap().clone()
    }
}

#[async_trait]
impl Compositor for MockCompositor {
    async fn compose(&self, _video: &Path, subtitles: &Path, video_out: &Path) -> Result<(), ToolError> {
        if self.fail {
            return Err(ToolError::TimedOut {
                tool: "subtitle composition".to_string(),
                seconds: 600,
            });
        }
        let script = fs::read_to_string(subtitles).map_err(|e| ToolError::Unavailable {
            tool: "subtitle composition".to_string(),
            message: e.to_string(),
        })?;
        fs::write(video_out, &script).map_err(|e| ToolError::Unavailable {
            tool: "subtitle composition".to_string(),
            message: e.to_string(),
        })?;
        *self.script.lock().unwrap() = Some(script);
        *self.output.lock().unwrap() = Some(video_out.to_path_buf());
        Ok(())
    }
}

/// Prefixes the text with the target language code
#[derive(Debug, Default)]
pub struct PrefixTranslator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for PrefixTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{}] {}", target, text))
    }
}

/// Always fails like an unreachable backend
#[derive(Debug, Default)]
pub struct FailingTranslator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::ConnectionError("connection refused".to_string()).into())
    }
}

/// Records every report for later inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub progress: Mutex<Vec<(f64, String)>>,
    pub states: Mutex<Vec<PipelineState>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn progress_values(&self) -> Vec<f64> {
        self.progress.lock().unwrap().iter().map(|(v, _)| *v).collect()
    }

    pub fn states(&self) -> Vec<PipelineState> {
        self.states.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, progress: f64, message: &str) {
        self.progress.lock().unwrap().push((progress, message.to_string()));
    }

    fn state_changed(&self, state: PipelineState) {
        self.states.lock().unwrap().push(state);
    }
}

impl ErrorSink for RecordingSink {
    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Handles on the mocks wired into a [`Collaborators`] set
pub struct MockSet {
    pub extractor: Arc<MockExtractor>,
    pub recognizer: Arc<MockRecognizer>,
    pub translator: Arc<dyn Translator>,
    pub compositor: Arc<MockCompositor>,
}

impl MockSet {
    pub fn new(recognizer: MockRecognizer) -> Self {
        Self {
            extractor: Arc::new(MockExtractor::default()),
            recognizer: Arc::new(recognizer),
            translator: Arc::new(PrefixTranslator::default()),
            compositor: Arc::new(MockCompositor::default()),
        }
    }

    pub fn with_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_compositor(mut self, compositor: MockCompositor) -> Self {
        self.compositor = Arc::new(compositor);
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            extractor: self.extractor.clone(),
            recognizer: self.recognizer.clone(),
            translator: Arc::clone(&self.translator),
            compositor: self.compositor.clone(),
        }
    }
}
