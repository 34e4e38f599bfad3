/*!
 * # subforge - speech to styled subtitles
 *
 * A Rust library that turns the speech of a video into a styled, optionally
 * translated subtitle track and burns it back into the video.
 *
 * ## Features
 *
 * - Audio extraction and subtitle composition through ffmpeg
 * - Speech recognition through an external engine printing JSON results
 * - Word tokens grouped into phrases by length, pause, word count and punctuation
 * - On-screen duration clamping and multi-line wrapping
 * - Translation through a LibreTranslate compatible API, with fallback to the original text
 * - ASS rendering with configurable font size, position, colours and transparency
 * - Staged runs with progress reporting and temp file cleanup
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `subtitle`: Phrase building, timing, layout and ASS rendering
 * - `speech`: Speech recognizer trait and the command-backed engine
 * - `media`: Audio extraction and composition (ffmpeg)
 * - `providers`: Translation backend clients
 * - `translation`: Translator trait, cached service and phrase adapter
 * - `pipeline`: Run states, progress sinks, orchestrator and worker
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language codes and language pairs
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod media;
pub mod pipeline;
pub mod providers;
pub mod speech;
pub mod subtitle;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, PipelineError, ProviderError, RecognitionError, ToolError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use pipeline::{PipelineContext, PipelineOrchestrator, PipelineWorker};
pub use subtitle::{SubtitlePhrase, SubtitleStyle, WordToken};
pub use translation::{TranslationAdapter, TranslationService, Translator};
