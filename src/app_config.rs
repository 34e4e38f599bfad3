use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::subtitle::model::{FontSize, Position, RgbaColor};

/// Upper bound for translation retries; backoff doubles on every retry
pub const MAX_RETRY_COUNT: u32 = 10;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language spoken in the video (ISO)
    pub source_language: String,

    /// Language of the produced subtitles (ISO)
    pub target_language: String,

    /// Phrase building and timing thresholds
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Visual style of the subtitles
    #[serde(default)]
    pub style: StyleConfig,

    /// External tools
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Translation backend
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Thresholds used by segmentation, timing and layout
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Characters allowed in one phrase, spaces excluded
    #[serde(default = "default_max_chars_per_phrase")]
    pub max_chars_per_phrase: usize,

    /// Words allowed in one phrase
    #[serde(default = "default_max_words_per_phrase")]
    pub max_words_per_phrase: usize,

    /// Longest pause between two words of the same phrase, in seconds
    #[serde(default = "default_max_pause_secs")]
    pub max_pause_secs: f64,

    /// Number of display lines a phrase is wrapped into
    #[serde(default = "default_display_lines")]
    pub display_lines: usize,

    /// Longest time a phrase stays on screen, in seconds
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: f64,

    /// Phrases shorter than this are not shown, in seconds
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: f64,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            max_chars_per_phrase: default_max_chars_per_phrase(),
            max_words_per_phrase: default_max_words_per_phrase(),
            max_pause_secs: default_max_pause_secs(),
            display_lines: default_display_lines(),
            max_duration_secs: default_max_duration_secs(),
            min_duration_secs: default_min_duration_secs(),
        }
    }
}

/// User selections for the subtitle look
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StyleConfig {
    #[serde(default)]
    pub font_size: FontSize,

    #[serde(default)]
    pub position: Position,

    /// Text colour (`#RRGGBB`, `#RRGGBBAA` or a colour name)
    #[serde(default = "default_text_color")]
    pub text_color: String,

    /// Colour of the box behind the text
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Text transparency in percent (0 = opaque, 100 = transparent)
    #[serde(default)]
    pub transparency: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            position: Position::default(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            transparency: 0,
        }
    }
}

/// Speech recognizer process configuration
///
/// The command must print the engine's JSON results (one object per
/// utterance chunk) on stdout. `{audio}`, `{model}` and `{sample_rate}`
/// placeholders in `args` are substituted before launching.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecognizerConfig {
    #[serde(default = "default_recognizer_command")]
    pub command: String,

    #[serde(default = "default_recognizer_args")]
    pub args: Vec<String>,

    /// Directory holding one model directory per language
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl RecognizerConfig {
    /// Model location for a language: `<models_dir>/<lang>/vosk-model`
    pub fn model_path_for(&self, language: &str) -> PathBuf {
        self.models_dir.join(language).join("vosk-model")
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            command: default_recognizer_command(),
            args: default_recognizer_args(),
            models_dir: default_models_dir(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// External tool configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolsConfig {
    /// ffmpeg binary used for extraction and composition
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Timeout applied to every external process, in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: default_tool_timeout_secs(),
            recognizer: RecognizerConfig::default(),
        }
    }
}

/// Translation backend configuration (LibreTranslate compatible)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Full URL of the translate endpoint
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// API key, sent only when not empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds), doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Whether to keep translations of repeated phrases in memory
    #[serde(default = "default_true")]
    pub enable_cache: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            enable_cache: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chars_per_phrase() -> usize {
    55
}

fn default_max_words_per_phrase() -> usize {
    16
}

fn default_max_pause_secs() -> f64 {
    0.5
}

fn default_display_lines() -> usize {
    2
}

fn default_max_duration_secs() -> f64 {
    7.2
}

fn default_min_duration_secs() -> f64 {
    0.2
}

fn default_text_color() -> String {
    "#FFFFFF".to_string()
}

fn default_background_color() -> String {
    "#000000".to_string()
}

fn default_recognizer_command() -> String {
    "vosk-json".to_string()
}

fn default_recognizer_args() -> Vec<String> {
    vec![
        "--model".to_string(),
        "{model}".to_string(),
        "--sample-rate".to_string(),
        "{sample_rate}".to_string(),
        "{audio}".to_string(),
    ]
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models/vosk")
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_tool_timeout_secs() -> u64 {
    600
}

fn default_translation_endpoint() -> String {
    "http://127.0.0.1:5000/translate".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, writing the default one when it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()));
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        let subtitle = &self.subtitle;
        if subtitle.max_chars_per_phrase == 0 || subtitle.max_words_per_phrase == 0 {
            return Err(anyhow!("Phrase limits must be greater than zero"));
        }
        if subtitle.display_lines == 0 {
            return Err(anyhow!("At least one display line is required"));
        }
        if subtitle.max_pause_secs < 0.0 {
            return Err(anyhow!("Maximum pause between words cannot be negative"));
        }
        if subtitle.min_duration_secs < 0.0 || subtitle.max_duration_secs <= subtitle.min_duration_secs {
            return Err(anyhow!(
                "Invalid on-screen durations: min {}s, max {}s",
                subtitle.min_duration_secs,
                subtitle.max_duration_secs
            ));
        }

        if self.style.transparency > 100 {
            return Err(anyhow!("Transparency must be between 0 and 100, got {}", self.style.transparency));
        }
        self.style.text_color.parse::<RgbaColor>()
            .context("Invalid text colour")?;
        self.style.background_color.parse::<RgbaColor>()
            .context("Invalid background colour")?;

        if self.tools.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("ffmpeg path is required"));
        }
        if self.tools.recognizer.command.trim().is_empty() {
            return Err(anyhow!("Recognizer command is required"));
        }

        if self.translation.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!(
                "Retry count must be at most {}, got {}",
                MAX_RETRY_COUNT,
                self.translation.retry_count
            ));
        }
        Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "en".to_string(),
            subtitle: SubtitleConfig::default(),
            style: StyleConfig::default(),
            tools: ToolsConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
