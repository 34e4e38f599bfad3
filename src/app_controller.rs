use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::app_config::Config;
use crate::errors::{AppError, PipelineError};
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::media::{FfmpegAudioExtractor, FfmpegCompositor};
use crate::pipeline::{
    ChannelProgressSink, Collaborators, PipelineContext, PipelineEvent, PipelineOrchestrator,
    PipelineWorker,
};
use crate::speech::CommandRecognizer;
use crate::subtitle::SubtitleStyle;
use crate::translation::TranslationService;

// @module: Application controller for video subtitling

/// Main application controller: validates input, wires collaborators and drives runs
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Single run slot
    worker: PipelineWorker,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self {
            config,
            worker: PipelineWorker::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check the input video and output directory before starting a run
    pub fn validate_inputs(&self, input_video: &Path, output_dir: &Path) -> Result<(), PipelineError> {
        if !FileManager::file_exists(input_video) {
            return Err(PipelineError::Input(format!(
                "Input video does not exist: {}",
                input_video.display()
            )));
        }
        if !FileManager::dir_exists(output_dir) {
            return Err(PipelineError::Input(format!(
                "Output directory does not exist: {}",
                output_dir.display()
            )));
        }

        match FileManager::detect_file_type(input_video) {
            Ok(FileType::Video) => {}
            Ok(FileType::Unknown) => warn!(
                "{} does not have a known video extension, trying anyway",
                input_video.display()
            ),
            Err(e) => return Err(PipelineError::Input(e.to_string())),
        }
        Ok(())
    }

    /// Style shared by every phrase of a run
    pub fn build_style(&self) -> Result<Arc<SubtitleStyle>> {
        let style = SubtitleStyle::from_config(&self.config.style).context("Invalid subtitle style")?;
        Ok(Arc::new(style))
    }

    /// Production collaborators: ffmpeg, the recognizer command and the translation backend
    pub fn build_collaborators(&self) -> Collaborators {
        let tools = &self.config.tools;
        let recognizer = CommandRecognizer::from_config(tools, &self.config.source_language);
        debug!("Speech recognition model: {}", recognizer.model_path().display());
        Collaborators {
            extractor: Arc::new(FfmpegAudioExtractor::from_config(tools)),
            recognizer: Arc::new(recognizer),
            translator: Arc::new(TranslationService::from_config(&self.config.translation)),
            compositor: Arc::new(FfmpegCompositor::from_config(tools)),
        }
    }

    /// Warn early when translation is needed but the backend cannot be reached
    pub async fn check_translation_backend(&self) {
        if language_utils::language_codes_match(&self.config.source_language, &self.config.target_language) {
            return;
        }
        let service = TranslationService::from_config(&self.config.translation);
        if let Err(e) = service.test_connection().await {
            warn!("Translation backend unavailable ({}); subtitles will keep the original text", e);
        }
    }

    /// Run the main workflow with input video file and output directory
    pub async fn run(&self, input_video: PathBuf, output_dir: PathBuf) -> Result<PathBuf> {
        self.check_translation_backend().await;
        self.run_with_collaborators(self.build_collaborators(), input_video, output_dir)
            .await
    }

    /// Run with the given collaborators, rendering progress on a terminal bar
    pub async fn run_with_collaborators(
        &self,
        collaborators: Collaborators,
        input_video: PathBuf,
        output_dir: PathBuf,
    ) -> Result<PathBuf> {
        let start_time = Instant::now();
        self.validate_inputs(&input_video, &output_dir)
            .map_err(AppError::from)?;

        info!(
            "Subtitling {} ({} -> {})",
            input_video.display(),
            self.config.source_language,
            self.config.target_language
        );

        let context = PipelineContext::new(
            input_video,
            &output_dir,
            &self.config.source_language,
            &self.config.target_language,
            self.build_style()?,
        );

        let (sender, receiver) = mpsc::unbounded_channel();
        let sink = Arc::new(ChannelProgressSink::new(sender));
        let renderer = tokio::spawn(render_progress(receiver));

        let orchestrator = Arc::new(
            PipelineOrchestrator::new(collaborators, &self.config.subtitle)
                .with_sinks(sink.clone(), sink.clone()),
        );
        let outcome = self.worker.submit(orchestrator, context).wait().await;

        if let Some(Ok(output)) = &outcome {
            sink.finished(output.clone());
        }
        drop(sink);
        if let Err(e) = renderer.await {
            debug!("Progress renderer stopped: {}", e);
        }

        match outcome {
            Some(Ok(output)) => {
                info!(
                    "Done in {:.1}s, saved in: {}",
                    start_time.elapsed().as_secs_f64(),
                    output.display()
                );
                Ok(output)
            }
            Some(Err(e)) => Err(AppError::from(e).into()),
            None => Err(anyhow!("The pipeline run was cancelled")),
        }
    }

    /// Abort the active run, if any
    pub fn cancel(&self) -> bool {
        self.worker.cancel()
    }
}

/// Draw pipeline events on a progress bar until every sender is gone
async fn render_progress(mut receiver: UnboundedReceiver<PipelineEvent>) {
    let progress_bar = ProgressBar::new(100);
    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {percent}% {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(template_result.progress_chars("█▓▒░"));

    while let Some(event) = receiver.recv().await {
        match event {
            PipelineEvent::Progress { value, message } => {
                progress_bar.set_position((value.clamp(0.0, 1.0) * 100.0).round() as u64);
                progress_bar.set_message(message);
            }
            PipelineEvent::StateChanged(state) => progress_bar.set_message(state.status()),
            PipelineEvent::Failed(message) => progress_bar.abandon_with_message(message),
            PipelineEvent::Finished(output) => {
                progress_bar.finish_with_message(format!("Saved in: {}", output.display()))
            }
        }
    }

    if !progress_bar.is_finished() {
        progress_bar.finish_and_clear();
    }
}
