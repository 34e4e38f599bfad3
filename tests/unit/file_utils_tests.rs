/*!
 * Tests for file utility functions
 */

use std::path::{Path, PathBuf};

use subforge::file_utils::{FileManager, FileType};

use crate::common;

#[test]
fn test_generateOutputPath_withVideo_shouldAppendLanguageToStem() {
    let output = FileManager::generate_output_path("/videos/talk.mp4", "/out", "ru");
    assert_eq!(output, PathBuf::from("/out/talk_ru.mp4"));
}

#[test]
fn test_generateOutputPath_withoutExtension_shouldOmitDot() {
    let output = FileManager::generate_output_path("clip", "out", "en");
    assert_eq!(output, Path::new("out").join("clip_en"));
}

#[test]
fn test_tempPath_shouldCombinePrefixAndRunId() {
    let path = FileManager::temp_path("/out", "temp_audio", "abc123", "wav");
    assert_eq!(path, PathBuf::from("/out/temp_audio_abc123.wav"));
}

#[test]
fn test_writeToFile_withMissingParent_shouldCreateDirectories() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested/dir/subtitles.ass");

    FileManager::write_to_file(&path, "[Script Info]").unwrap();
    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "[Script Info]");
}

#[test]
fn test_removeTempFile_withExistingAndMissingFiles_shouldNotFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "temp_audio.wav", "data").unwrap();

    FileManager::remove_temp_file(&path);
    assert!(!path.exists());

    FileManager::remove_temp_file(&path);
}

#[test]
fn test_detectFileType_withExtensions_shouldRecognizeVideos() {
    let temp_dir = common::create_temp_dir().unwrap();
    let video = common::create_test_video(temp_dir.path(), "movie.MKV").unwrap();
    let text = common::create_test_file(temp_dir.path(), "notes.txt", "hi").unwrap();

    assert_eq!(FileManager::detect_file_type(&video).unwrap(), FileType::Video);
    assert_eq!(FileManager::detect_file_type(&text).unwrap(), FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.mp4")).is_err());
}

#[test]
fn test_dirExists_withFileAndDirectory_shouldDistinguish() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(temp_dir.path(), "a.txt", "").unwrap();

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
}
