/*!
 * Staged execution of one subtitle run.
 *
 * extraction → recognition → segmentation → translation → layout/timing →
 * rendering → composition. Every stage takes the previous stage's output by
 * value; nothing is shared between runs. Temporary files are removed when the
 * run future completes or is dropped. Run state lives with the run, so one
 * orchestrator can serve overlapping runs.
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::SubtitleConfig;
use crate::errors::{PipelineError, RecognitionError};
use crate::file_utils::FileManager;
use crate::media::{AudioExtractor, Compositor};
use crate::speech::SpeechRecognizer;
use crate::subtitle::{
    PhraseSegmenter, SubtitlePhrase, SubtitleStyle, SubtitleTrackRenderer, TextLayoutFormatter,
    TimingNormalizer, WordToken,
};
use crate::translation::{TranslationAdapter, Translator};
use super::progress::{ErrorSink, LogSink, ProgressSink};
use super::state::{Milestone, PipelineState};

/// Per-run inputs and artifact locations
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub input_video: PathBuf,
    pub output_video: PathBuf,
    pub temp_audio: PathBuf,
    pub temp_subtitles: PathBuf,
    pub source_language: String,
    pub target_language: String,
    pub style: Arc<SubtitleStyle>,
}

impl PipelineContext {
    /// Lay out output and temp paths inside `output_dir`. Temp names carry a fresh run id.
    pub fn new(
        input_video: impl Into<PathBuf>,
        output_dir: impl AsRef<Path>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        style: Arc<SubtitleStyle>,
    ) -> Self {
        let input_video = input_video.into();
        let output_dir = output_dir.as_ref();
        let target_language = target_language.into();
        let run_id = Uuid::new_v4().simple().to_string();

        Self {
            output_video: FileManager::generate_output_path(&input_video, output_dir, &target_language),
            temp_audio: FileManager::temp_path(output_dir, "temp_audio", &run_id, "wav"),
            temp_subtitles: FileManager::temp_path(output_dir, "subtitles", &run_id, "ass"),
            input_video,
            source_language: source_language.into(),
            target_language,
            style,
        }
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if !FileManager::file_exists(&self.input_video) {
            return Err(PipelineError::Input(format!(
                "Input video does not exist: {}",
                self.input_video.display()
            )));
        }
        let output_dir = self.output_video.parent().unwrap_or_else(|| Path::new("."));
        if !output_dir.as_os_str().is_empty() && !FileManager::dir_exists(output_dir) {
            return Err(PipelineError::Input(format!(
                "Output directory does not exist: {}",
                output_dir.display()
            )));
        }
        Ok(())
    }
}

/// Removes the listed files when dropped
struct TempArtifacts {
    paths: Vec<PathBuf>,
}

impl TempArtifacts {
    fn new(context: &PipelineContext) -> Self {
        Self {
            paths: vec![context.temp_audio.clone(), context.temp_subtitles.clone()],
        }
    }
}

impl Drop for TempArtifacts {
    fn drop(&mut self) {
        for path in &self.paths {
            FileManager::remove_temp_file(path);
        }
    }
}

/// External collaborators of a run
#[derive(Clone)]
pub struct Collaborators {
    pub extractor: Arc<dyn AudioExtractor>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub translator: Arc<dyn Translator>,
    pub compositor: Arc<dyn Compositor>,
}

/// Runs the subtitle pipeline and reports its progress
pub struct PipelineOrchestrator {
    collaborators: Collaborators,
    adapter: TranslationAdapter,
    segmenter: PhraseSegmenter,
    timing: TimingNormalizer,
    layout: TextLayoutFormatter,
    progress: Arc<dyn ProgressSink>,
    errors: Arc<dyn ErrorSink>,
    // @field: Last state reported by any run, for observers only
    latest: Mutex<PipelineState>,
}

impl PipelineOrchestrator {
    pub fn new(collaborators: Collaborators, config: &SubtitleConfig) -> Self {
        Self {
            adapter: TranslationAdapter::new(Arc::clone(&collaborators.translator)),
            collaborators,
            segmenter: PhraseSegmenter::from_config(config),
            timing: TimingNormalizer::from_config(config),
            layout: TextLayoutFormatter::from_config(config),
            progress: Arc::new(LogSink),
            errors: Arc::new(LogSink),
            latest: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn with_sinks(mut self, progress: Arc<dyn ProgressSink>, errors: Arc<dyn ErrorSink>) -> Self {
        self.progress = progress;
        self.errors = errors;
        self
    }

    /// Last state reported by a run of this orchestrator
    pub fn state(&self) -> PipelineState {
        *self.latest.lock()
    }

    /// Execute one run. Failures are reported to the sinks and returned, never raised further.
    pub async fn run(&self, context: PipelineContext) -> Result<PathBuf, PipelineError> {
        let _artifacts = TempArtifacts::new(&context);
        let mut state = PipelineState::Idle;

        match self.execute(&context, &mut state).await {
            Ok(output) => {
                info!("The video has been processed successfully! Saved in: {}", output.display());
                Ok(output)
            }
            Err(e) => {
                self.enter(&mut state, PipelineState::Failed);
                self.progress.report(0.0, PipelineState::Failed.status());
                error!("Pipeline failed: {}", e);
                self.errors.report_error(&e.user_message());
                Err(e)
            }
        }
    }

    async fn execute(&self, context: &PipelineContext, state: &mut PipelineState) -> Result<PathBuf, PipelineError> {
        self.milestone(Milestone::Started);
        context.validate()?;

        self.enter(state, PipelineState::ExtractingAudio);
        self.collaborators
            .extractor
            .extract(&context.input_video, &context.temp_audio)
            .await?;
        self.milestone(Milestone::AudioExtracted);

        self.enter(state, PipelineState::Recognizing);
        let tokens = self.collaborators.recognizer.recognize(&context.temp_audio).await?;
        self.milestone(Milestone::SpeechRecognized);

        self.enter(state, PipelineState::Styling);
        let phrases = self.build_phrases(&tokens, context).await?;
        let script = SubtitleTrackRenderer::render(&phrases, &context.style);
        SubtitleTrackRenderer::write_to_file(&context.temp_subtitles, &script)
            .map_err(|e| PipelineError::Render(format!("{:#}", e)))?;
        self.milestone(Milestone::SubtitlesStyled);

        self.enter(state, PipelineState::Composing);
        self.collaborators
            .compositor
            .compose(&context.input_video, &context.temp_subtitles, &context.output_video)
            .await?;
        self.milestone(Milestone::SubtitlesComposed);

        self.enter(state, PipelineState::Done);
        self.milestone(Milestone::Done);
        Ok(context.output_video.clone())
    }

    /// Tokens to display-ready phrases: segment, drop unusable, translate, wrap, clamp, style
    async fn build_phrases(
        &self,
        tokens: &[WordToken],
        context: &PipelineContext,
    ) -> Result<Vec<SubtitlePhrase>, PipelineError> {
        if tokens.is_empty() {
            return Err(RecognitionError::NoSpeech("no words were recognized".to_string()).into());
        }

        let phrases: Vec<SubtitlePhrase> = self
            .segmenter
            .segment(tokens)
            .into_iter()
            .filter(|p| !p.is_blank() && self.timing.meets_minimum(p))
            .collect();

        if phrases.is_empty() {
            return Err(RecognitionError::NoSpeech(format!(
                "none of the {} recognized words form a displayable phrase",
                tokens.len()
            ))
            .into());
        }
        debug!("Built {} phrases from {} words", phrases.len(), tokens.len());

        let translated = self
            .adapter
            .translate_phrases(phrases, &context.source_language, &context.target_language)
            .await;

        let wrapped = translated
            .into_iter()
            .map(|phrase| SubtitlePhrase {
                text: self.layout.wrap(&phrase.text),
                ..phrase
            })
            .collect();

        Ok(self
            .timing
            .normalize_track(wrapped)
            .into_iter()
            .map(|phrase| phrase.with_style(Arc::clone(&context.style)))
            .collect())
    }

    fn enter(&self, state: &mut PipelineState, next: PipelineState) {
        if !state.can_transition_to(next) {
            warn!("Unexpected pipeline transition {} -> {}", state, next);
        }
        *state = next;
        *self.latest.lock() = next;
        self.progress.state_changed(next);
    }

    fn milestone(&self, milestone: Milestone) {
        self.progress.report(milestone.progress(), milestone.message());
    }
}
