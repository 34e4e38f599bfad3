use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::ToolsConfig;
use crate::errors::RecognitionError;
use crate::media::process::run_tool;
use crate::subtitle::WordToken;
use super::parser::parse_transcript;
use super::SpeechRecognizer;

// @module: Recognizer backed by an external engine process

/// Runs a recognition engine command and parses the JSON it prints on stdout.
///
/// `{audio}`, `{model}` and `{sample_rate}` in the arguments are replaced before launch.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    model_path: PathBuf,
    sample_rate: u32,
    timeout: Duration,
}

impl CommandRecognizer {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        model_path: PathBuf,
        sample_rate: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            model_path,
            sample_rate,
            timeout,
        }
    }

    /// Recognizer for `language` using the model laid out under the configured models directory
    pub fn from_config(config: &ToolsConfig, language: &str) -> Self {
        let recognizer = &config.recognizer;
        Self::new(
            &recognizer.command,
            recognizer.args.clone(),
            recognizer.model_path_for(language),
            recognizer.sample_rate,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn expand_args(&self, audio: &Path) -> Vec<String> {
        let audio = audio.to_string_lossy();
        let model = self.model_path.to_string_lossy();
        let sample_rate = self.sample_rate.to_string();

        self.args
            .iter()
            .map(|arg| {
                arg.replace("{audio}", &audio)
                    .replace("{model}", &model)
                    .replace("{sample_rate}", &sample_rate)
            })
            .collect()
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self, audio: &Path) -> Result<Vec<WordToken>, RecognitionError> {
        if !self.model_path.exists() {
            return Err(RecognitionError::Engine(format!(
                "Recognition model not found: {}",
                self.model_path.display()
            )));
        }

        let output = run_tool("speech recognizer", &self.program, self.expand_args(audio), self.timeout).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let tokens = parse_transcript(&stdout)?;

        info!("Recognized {} words", tokens.len());
        Ok(tokens)
    }
}
