use crate::app_config::SubtitleConfig;

// @module: Line wrapping for subtitle text

/// Hard line break understood by the ASS renderer
pub const LINE_BREAK: &str = "\\N";

/// Splits phrase text over a fixed number of display lines
#[derive(Debug, Clone, Copy)]
pub struct TextLayoutFormatter {
    max_words_per_phrase: usize,
    display_lines: usize,
}

impl TextLayoutFormatter {
    pub fn new(max_words_per_phrase: usize, display_lines: usize) -> Self {
        Self {
            max_words_per_phrase,
            display_lines,
        }
    }

    pub fn from_config(config: &SubtitleConfig) -> Self {
        Self::new(config.max_words_per_phrase, config.display_lines)
    }

    /// Insert line breaks at even word intervals when the text is too long for one line
    pub fn wrap(&self, text: &str) -> String {
        if self.display_lines < 2 {
            return text.to_string();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= self.max_words_per_phrase / self.display_lines {
            return text.to_string();
        }

        let lines = self.display_lines.min(words.len());
        let mut rows = Vec::with_capacity(lines);
        let mut from = 0;
        for line in 1..=lines {
            let to = line * words.len() / lines;
            rows.push(words[from..to].join(" "));
            from = to;
        }
        rows.join(LINE_BREAK)
    }
}
