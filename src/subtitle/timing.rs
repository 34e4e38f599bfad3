use crate::app_config::SubtitleConfig;
use super::model::SubtitlePhrase;

// @module: On-screen duration policy

/// Keeps phrases from lingering on screen over silence.
///
/// Long phrases keep their end time and lose the beginning of their window.
/// Short phrases are never stretched; callers drop them with [`TimingNormalizer::meets_minimum`].
#[derive(Debug, Clone, Copy)]
pub struct TimingNormalizer {
    max_duration_secs: f64,
    min_duration_secs: f64,
}

impl TimingNormalizer {
    pub fn new(max_duration_secs: f64, min_duration_secs: f64) -> Self {
        Self {
            max_duration_secs,
            min_duration_secs,
        }
    }

    pub fn from_config(config: &SubtitleConfig) -> Self {
        Self::new(config.max_duration_secs, config.min_duration_secs)
    }

    /// Clamp the display window to the maximum duration
    pub fn normalize(&self, phrase: SubtitlePhrase) -> SubtitlePhrase {
        if phrase.duration() <= self.max_duration_secs {
            return phrase;
        }

        SubtitlePhrase {
            start: phrase.start.max(phrase.end - self.max_duration_secs),
            ..phrase
        }
    }

    /// Clamp every phrase of a track and keep the track ordered by start time.
    ///
    /// Clamping keeps the end of a long phrase, so its start can move past the
    /// start of a following phrase that overlaps it. The sort is stable.
    pub fn normalize_track(&self, phrases: Vec<SubtitlePhrase>) -> Vec<SubtitlePhrase> {
        let mut track: Vec<SubtitlePhrase> = phrases.into_iter().map(|p| self.normalize(p)).collect();
        track.sort_by(|a, b| a.start.total_cmp(&b.start));
        track
    }

    /// Whether a phrase lasts long enough to be shown at all
    pub fn meets_minimum(&self, phrase: &SubtitlePhrase) -> bool {
        phrase.duration() >= self.min_duration_secs
    }
}
