/*!
 * ASS subtitle track rendering.
 *
 * Produces the script consumed by the compositor: a script info header, a
 * single `Default` style built from the run style, and one `Dialogue` event
 * per non-blank phrase.
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use std::path::Path;

use crate::file_utils::FileManager;
use super::layout::LINE_BREAK;
use super::model::{SubtitlePhrase, SubtitleStyle};

// @const: Raw line endings inside event text
static NEWLINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

const SCRIPT_INFO: &str = "[Script Info]\n\
ScriptType: v4.00+\n\
PlayResX: 384\n\
PlayResY: 288\n\
ScaledBorderAndShadow: no\n\n";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n";

/// Serializes phrases into an ASS script
pub struct SubtitleTrackRenderer;

impl SubtitleTrackRenderer {
    /// Render the whole track. An empty phrase list yields an empty string.
    pub fn render(phrases: &[SubtitlePhrase], style: &SubtitleStyle) -> String {
        if phrases.is_empty() {
            return String::new();
        }

        let mut script = Self::header(style);
        for phrase in phrases.iter().filter(|p| !p.is_blank()) {
            let _ = writeln!(
                script,
                "Dialogue: 0,{},{},Default,,0,0,0,,{}",
                Self::format_time(phrase.start),
                Self::format_time(phrase.end),
                Self::event_text(&phrase.text)
            );
        }
        script
    }

    fn header(style: &SubtitleStyle) -> String {
        let mut header = String::from(SCRIPT_INFO);
        header.push_str("[V4+ Styles]\n");
        header.push_str(STYLE_FORMAT);
        let _ = write!(
            header,
            "Style: Default,Arial,{},{},&H000000FF,&H80000000,{},-1,0,0,0,100,100,0,0,4,0,0,{},15,15,20,1\n\n",
            style.font_size,
            style.text_color,
            style.background_color,
            style.position.alignment()
        );
        header.push_str("[Events]\n");
        header.push_str(EVENT_FORMAT);
        header
    }

    /// Format seconds as `H:MM:SS.CC`
    pub fn format_time(seconds: f64) -> String {
        let seconds = seconds.max(0.0);
        let hours = (seconds / 3600.0).floor() as u64;
        let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
        let secs = (seconds % 60.0).floor() as u64;
        let centis = ((seconds - seconds.floor()) * 100.0).floor() as u64;

        format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
    }

    // Events must stay on a single line
    fn event_text(text: &str) -> String {
        NEWLINE_REGEX.replace_all(text.trim(), LINE_BREAK).into_owned()
    }

    /// Persist a rendered track
    pub fn write_to_file<P: AsRef<Path>>(path: P, script: &str) -> Result<()> {
        let path = path.as_ref();
        FileManager::write_to_file(path, script)
            .with_context(|| format!("Failed to save subtitle track: {}", path.display()))
    }
}
