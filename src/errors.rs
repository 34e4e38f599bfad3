/*!
 * Error types for the subforge application.
 *
 * This module contains custom error types for the different stages of the
 * subtitle pipeline, using the thiserror crate for ergonomic error definitions.
 * Only translation failures are recovered locally; every other pipeline error
 * aborts the remaining stages of a run.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The backend answered but returned no text
    #[error("Translation backend returned an empty text")]
    EmptyResponse,
}

/// Errors raised by external tools (audio extractor, compositor, recognizer process)
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool could not be started at all
    #[error("{tool} is unavailable: {message}")]
    Unavailable { tool: String, message: String },

    /// The tool ran but exited unsuccessfully
    #[error("{tool} failed ({status}): {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// The tool did not finish in time
    #[error("{tool} timed out after {seconds} seconds")]
    TimedOut { tool: String, seconds: u64 },
}

/// Errors raised by the speech recognition stage
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The recognition engine failed
    #[error("Recognition engine error: {0}")]
    Engine(String),

    /// The engine output could not be understood
    #[error("Failed to parse recognition output: {0}")]
    Parse(String),

    /// Recognition produced nothing usable
    #[error("Speech not recognized: {0}")]
    NoSpeech(String),
}

impl From<ToolError> for RecognitionError {
    fn from(error: ToolError) -> Self {
        Self::Engine(error.to_string())
    }
}

/// Errors that end a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing or invalid input video / output directory
    #[error("Invalid input: {0}")]
    Input(String),

    /// Extraction or composition failed
    #[error("External tool error: {0}")]
    ExternalTool(#[from] ToolError),

    /// Recognition failed or yielded no usable phrases
    #[error("{0}")]
    Recognition(#[from] RecognitionError),

    /// Translation failure; the pipeline itself recovers from these
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// The subtitle track could not be persisted
    #[error("Failed to write subtitle track: {0}")]
    Render(String),
}

impl PipelineError {
    /// Short user-facing description of the failing stage
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Input(_) => "Please fill in all fields correctly",
            Self::ExternalTool(_) => "Error while processing video",
            Self::Recognition(_) => "Unable to recognize speech in the video",
            Self::Translation(_) => "Translation failed",
            Self::Render(_) => "Failed to create subtitles",
        }
    }

    /// Short message plus the underlying cause
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.summary(), self)
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a pipeline run
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
