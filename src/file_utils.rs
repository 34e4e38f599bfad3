use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @const: Containers ffmpeg can read and write without re-muxing surprises
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ogv", "ts", "mts",
    "m2ts",
];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for the subtitled video
    // @params: input_video, output_dir, target_language
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_video: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let input_video = input_video.as_ref();
        let stem = input_video.file_stem().unwrap_or_default().to_string_lossy();

        let output_filename = match input_video.extension() {
            Some(ext) => format!("{}_{}.{}", stem, target_language, ext.to_string_lossy()),
            None => format!("{}_{}", stem, target_language),
        };

        output_dir.as_ref().join(output_filename)
    }

    // @generates: Temp file path inside the output directory
    pub fn temp_path<P: AsRef<Path>>(output_dir: P, prefix: &str, run_id: &str, extension: &str) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_{}.{}", prefix, run_id, extension))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Delete a temporary file; failures are only logged
    pub fn remove_temp_file<P: AsRef<Path>>(path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!("Removed temporary file {:?}", path),
            Err(e) => warn!("Failed to remove temporary file {:?}: {}", path, e),
        }
    }

    /// Detect whether a file looks like a video ffmpeg can process
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        let is_video = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()));

        Ok(if is_video { FileType::Video } else { FileType::Unknown })
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Video file supported by ffmpeg
    Video,
    /// Unknown file type
    Unknown,
}
