use async_trait::async_trait;
use log::info;
use std::path::Path;
use std::time::Duration;

use crate::app_config::ToolsConfig;
use crate::errors::ToolError;
use super::process::run_tool;
use super::{AudioExtractor, Compositor};

// @module: ffmpeg-backed media collaborators

// @const: Sample rate expected by the recognizer models
const EXTRACT_SAMPLE_RATE: u32 = 16_000;

/// Escape a path for use inside an ffmpeg filter graph argument
pub fn escape_filter_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        format!("'{}'", raw.replace('\\', "/").replace(':', "\\:"))
    } else {
        raw.replace('\'', "'\\''")
    }
}

/// Extracts audio with `ffmpeg -i <video> -ac 1 -ar 16000 -y <audio>`
pub struct FfmpegAudioExtractor {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegAudioExtractor {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(&config.ffmpeg_path, Duration::from_secs(config.timeout_secs))
    }

    fn build_args(video: &Path, audio_out: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            video.to_string_lossy().into_owned(),
            "-ac".to_string(),
            "1".to_string(),
            "-ar".to_string(),
            EXTRACT_SAMPLE_RATE.to_string(),
            "-y".to_string(),
            audio_out.to_string_lossy().into_owned(),
        ]
    }
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    async fn extract(&self, video: &Path, audio_out: &Path) -> Result<(), ToolError> {
        run_tool(
            "audio extraction",
            &self.ffmpeg_path,
            Self::build_args(video, audio_out),
            self.timeout,
        )
        .await?;
        info!("Extracted audio track to {}", audio_out.display());
        Ok(())
    }
}

/// Burns subtitles with `ffmpeg -i <video> -filter_complex ass=<path> -c:a copy -y <out>`
pub struct FfmpegCompositor {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegCompositor {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(&config.ffmpeg_path, Duration::from_secs(config.timeout_secs))
    }

    fn build_args(video: &Path, subtitles: &Path, video_out: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            video.to_string_lossy().into_owned(),
            "-filter_complex".to_string(),
            format!("ass={}", escape_filter_path(subtitles)),
            "-c:a".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            video_out.to_string_lossy().into_owned(),
        ]
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    async fn compose(&self, video: &Path, subtitles: &Path, video_out: &Path) -> Result<(), ToolError> {
        run_tool(
            "subtitle composition",
            &self.ffmpeg_path,
            Self::build_args(video, subtitles, video_out),
            self.timeout,
        )
        .await?;
        info!("Wrote subtitled video to {}", video_out.display());
        Ok(())
    }
}
