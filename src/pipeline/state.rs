use std::fmt;

// @module: Pipeline run states and progress milestones

/// Stage a pipeline run is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ExtractingAudio,
    Recognizing,
    Styling,
    Composing,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The state that follows on success, `None` for terminal states
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::ExtractingAudio),
            Self::ExtractingAudio => Some(Self::Recognizing),
            Self::Recognizing => Some(Self::Styling),
            Self::Styling => Some(Self::Composing),
            Self::Composing => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Forward by one stage, or into `Failed` from any non-terminal state
    pub fn can_transition_to(&self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Failed || self.next() == Some(target)
    }

    /// Status line shown while the state is active
    pub fn status(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting",
            Self::ExtractingAudio => "Extracting audio from the video...",
            Self::Recognizing => "Speech recognition...",
            Self::Styling => "Creating stylized subtitles...",
            Self::Composing => "Adding subtitles to video...",
            Self::Done => "Processing completed!",
            Self::Failed => "Processing error",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Fixed progress points reported during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Started,
    AudioExtracted,
    SpeechRecognized,
    SubtitlesStyled,
    SubtitlesComposed,
    Done,
}

impl Milestone {
    pub const ALL: [Milestone; 6] = [
        Self::Started,
        Self::AudioExtracted,
        Self::SpeechRecognized,
        Self::SubtitlesStyled,
        Self::SubtitlesComposed,
        Self::Done,
    ];

    pub fn progress(&self) -> f64 {
        match self {
            Self::Started => 0.1,
            Self::AudioExtracted => 0.2,
            Self::SpeechRecognized => 0.4,
            Self::SubtitlesStyled => 0.8,
            Self::SubtitlesComposed => 0.9,
            Self::Done => 1.0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Started => "Start processing...",
            Self::AudioExtracted => "Audio extracted",
            Self::SpeechRecognized => "Speech recognized",
            Self::SubtitlesStyled => "Subtitles styled",
            Self::SubtitlesComposed => "Subtitles added to video",
            Self::Done => "Processing completed!",
        }
    }
}
