/*!
 * Audio extraction and subtitle composition.
 *
 * The pipeline only sees the [`AudioExtractor`] and [`Compositor`] traits;
 * the ffmpeg implementations live in [`ffmpeg`].
 */

use async_trait::async_trait;
use std::path::Path;

use crate::errors::ToolError;

pub mod ffmpeg;
pub mod process;

pub use self::ffmpeg::{escape_filter_path, FfmpegAudioExtractor, FfmpegCompositor};

/// Produces a mono 16 kHz WAV track from a video
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    async fn extract(&self, video: &Path, audio_out: &Path) -> Result<(), ToolError>;
}

/// Burns an ASS track into a copy of the video
#[async_trait]
pub trait Compositor: Send + Sync {
    async fn compose(&self, video: &Path, subtitles: &Path, video_out: &Path) -> Result<(), ToolError>;
}
