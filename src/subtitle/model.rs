/*!
 * Data model shared by the subtitle stages.
 *
 * Word tokens come from the speech engine, phrases are built by the segmenter
 * and then rewritten by the later stages. A style is built once per run and
 * referenced by every phrase of that run.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::app_config::StyleConfig;

/// Marks that end a phrase and that count as final punctuation
pub const PUNCTUATION_MARKS: [char; 6] = ['.', '!', '?', ',', ':', ';'];

/// Check whether the last character of a text is a punctuation mark
pub fn ends_with_punctuation(text: &str) -> bool {
    text.chars()
        .last()
        .is_some_and(|c| PUNCTUATION_MARKS.contains(&c))
}

/// A single recognized word with its timing in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl WordToken {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Number of characters of the word (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One displayable subtitle unit
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitlePhrase {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub style: Option<Arc<SubtitleStyle>>,
}

impl SubtitlePhrase {
    /// Creates an unstyled phrase
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            style: None,
        }
    }

    /// Attach the run style to this phrase
    pub fn with_style(mut self, style: Arc<SubtitleStyle>) -> Self {
        self.style = Some(style);
        self
    }

    /// Time the phrase stays on screen
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True when there is nothing to display
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Font size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Font size in ASS script points
    pub fn points(&self) -> u32 {
        match self {
            Self::Small => 18,
            Self::Medium => 24,
            Self::Large => 32,
        }
    }
}

/// Vertical placement of the subtitles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Bottom,
    Center,
    Top,
}

impl Position {
    /// ASS numpad alignment code (bottom-center, middle-center, top-center)
    pub fn alignment(&self) -> u8 {
        match self {
            Self::Bottom => 2,
            Self::Center => 5,
            Self::Top => 8,
        }
    }
}

/// An RGBA colour as chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RgbaColor {
    pub const WHITE: RgbaColor = RgbaColor::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: RgbaColor = RgbaColor::rgb(0x00, 0x00, 0x00);

    /// Fully opaque colour
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xFF,
        }
    }
}

impl FromStr for RgbaColor {
    type Err = anyhow::Error;

    /// Accepts `#RRGGBB`, `#RRGGBBAA` or a basic colour name
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "red" => return Ok(Self::rgb(0xFF, 0x00, 0x00)),
            "green" => return Ok(Self::rgb(0x00, 0x80, 0x00)),
            "blue" => return Ok(Self::rgb(0x00, 0x00, 0xFF)),
            "yellow" => return Ok(Self::rgb(0xFF, 0xFF, 0x00)),
            "gray" | "grey" => return Ok(Self::rgb(0x80, 0x80, 0x80)),
            _ => {}
        }

        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("Invalid colour: {}", s))?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow!("Invalid colour: {}", s));
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Self {
            red: byte(0)?,
            green: byte(2)?,
            blue: byte(4)?,
            alpha: if hex.len() == 8 { byte(6)? } else { 0xFF },
        })
    }
}

/// Colour packed the way ASS expects it: alpha, blue, green, red
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssColor {
    pub alpha: u8,
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl AssColor {
    /// Convert a user colour, applying a transparency percentage (0 = opaque, 100 = transparent).
    ///
    /// A request for 0% is treated as 1% so the alpha factor never collapses to zero.
    pub fn from_color(color: RgbaColor, transparency_percent: u8) -> Self {
        let transparency = match transparency_percent.min(100) {
            0 => 0.01,
            pct => f64::from(pct) / 100.0,
        };
        Self {
            alpha: (f64::from(color.alpha) * transparency) as u8,
            blue: color.blue,
            green: color.green,
            red: color.red,
        }
    }
}

impl fmt::Display for AssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "&H{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.blue, self.green, self.red
        )
    }
}

/// Transparency of the backing box, derived from the text transparency
pub fn background_transparency_for(text_transparency: u8) -> u8 {
    match text_transparency {
        0..=20 => 60,
        21..=50 => 30,
        _ => 15,
    }
}

/// Visual attributes applied to every phrase of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleStyle {
    pub text_color: AssColor,
    pub background_color: AssColor,
    pub font_size: u32,
    pub position: Position,
}

impl SubtitleStyle {
    /// Build the run style from the user's selections
    pub fn from_config(config: &StyleConfig) -> Result<Self> {
        let text: RgbaColor = config.text_color.parse()?;
        let background: RgbaColor = config.background_color.parse()?;

        Ok(Self {
            text_color: AssColor::from_color(text, config.transparency),
            background_color: AssColor::from_color(
                background,
                background_transparency_for(config.transparency),
            ),
            font_size: config.font_size.points(),
            position: config.position,
        })
    }
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            text_color: AssColor::from_color(RgbaColor::WHITE, 0),
            background_color: AssColor::from_color(RgbaColor::BLACK, background_transparency_for(0)),
            font_size: FontSize::default().points(),
            position: Position::default(),
        }
    }
}
