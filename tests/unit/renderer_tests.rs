/*!
 * Tests for subtitle style construction and ASS rendering
 */

use std::sync::Arc;

use subforge::app_config::StyleConfig;
use subforge::subtitle::{FontSize, Position, SubtitlePhrase, SubtitleStyle, SubtitleTrackRenderer};

use crate::common;

fn dialogue_lines(script: &str) -> Vec<&str> {
    script.lines().filter(|l| l.starts_with("Dialogue:")).collect()
}

#[test]
fn test_render_withEmptyList_shouldReturnEmptyString() {
    assert_eq!(SubtitleTrackRenderer::render(&[], &SubtitleStyle::default()), "");
}

#[test]
fn test_render_withBlankPhrase_shouldEmitNoDialogue() {
    let script = SubtitleTrackRenderer::render(&[SubtitlePhrase::new(0.0, 1.0, "   ")], &SubtitleStyle::default());

    assert!(script.contains("[Events]"));
    assert!(dialogue_lines(&script).is_empty());
}

#[test]
fn test_render_withDefaultStyle_shouldWriteExactHeader() {
    let script = SubtitleTrackRenderer::render(&[SubtitlePhrase::new(1.0, 2.5, "Hello world.")], &SubtitleStyle::default());

    let expected_header = "[Script Info]\n\
ScriptType: v4.00+\n\
PlayResX: 384\n\
PlayResY: 288\n\
ScaledBorderAndShadow: no\n\
\n\
[V4+ Styles]\n\
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
Style: Default,Arial,18,&H02FFFFFF,&H000000FF,&H80000000,&H99000000,-1,0,0,0,100,100,0,0,4,0,0,2,15,15,20,1\n\
\n\
[Events]\n\
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n";

    assert!(script.starts_with(expected_header), "{}", script);
    assert_eq!(
        dialogue_lines(&script),
        vec!["Dialogue: 0,0:00:01.00,0:00:02.50,Default,,0,0,0,,Hello world."]
    );
}

#[test]
fn test_render_withCustomStyle_shouldUseSizeColorsAndAlignment() {
    let style = SubtitleStyle::from_config(&StyleConfig {
        font_size: FontSize::Large,
        position: Position::Top,
        text_color: "#FF8000".to_string(),
        background_color: "#202020".to_string(),
        transparency: 50,
    })
    .unwrap();

    let script = SubtitleTrackRenderer::render(&[SubtitlePhrase::new(0.0, 1.0, "Hi.")], &style);
    let style_line = script.lines().find(|l| l.starts_with("Style:")).unwrap();

    // text alpha 255 * 0.5, background band 30%
    assert_eq!(
        style_line,
        "Style: Default,Arial,32,&H7F0080FF,&H000000FF,&H80000000,&H4C202020,-1,0,0,0,100,100,0,0,4,0,0,8,15,15,20,1"
    );
}

#[test]
fn test_render_withMultilineText_shouldKeepEventsOnOneLine() {
    let phrases = vec![
        SubtitlePhrase::new(0.0, 2.0, "First line\\Nsecond line."),
        SubtitlePhrase::new(2.5, 4.0, "Raw\nbreak."),
    ];
    let script = SubtitleTrackRenderer::render(&phrases, &SubtitleStyle::default());
    let lines = dialogue_lines(&script);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(",,First line\\Nsecond line."));
    assert!(lines[1].ends_with(",,Raw\\Nbreak."));
}

#[test]
fn test_render_withLongTimestamps_shouldFormatHours() {
    let script = SubtitleTrackRenderer::render(
        &[SubtitlePhrase::new(3723.5, 3725.0, "Late.")],
        &SubtitleStyle::default(),
    );
    assert!(dialogue_lines(&script)[0].starts_with("Dialogue: 0,1:02:03.50,1:02:05.00,"));
}

#[test]
fn test_styleFromConfig_withInvalidColor_shouldFail() {
    let config = StyleConfig {
        text_color: "not-a-color".to_string(),
        ..StyleConfig::default()
    };
    assert!(SubtitleStyle::from_config(&config).is_err());
}

#[test]
fn test_phraseWithStyle_shouldShareStyle() {
    let style = Arc::new(SubtitleStyle::default());
    let phrase = SubtitlePhrase::new(0.0, 1.0, "Hi.").with_style(Arc::clone(&style));

    assert!(Arc::ptr_eq(phrase.style.as_ref().unwrap(), &style));
}

#[test]
fn test_writeToFile_shouldPersistScript() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("subtitles.ass");
    let script = SubtitleTrackRenderer::render(&[SubtitlePhrase::new(0.0, 1.0, "Hi.")], &SubtitleStyle::default());

    SubtitleTrackRenderer::write_to_file(&path, &script).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), script);
}
