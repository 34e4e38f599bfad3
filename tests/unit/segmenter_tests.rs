/*!
 * Tests for phrase segmentation, timing normalization and line layout
 */

use subforge::app_config::SubtitleConfig;
use subforge::subtitle::{
    PhraseSegmenter, SubtitlePhrase, TextLayoutFormatter, TimingNormalizer, WordToken, LINE_BREAK,
};

use crate::common::{sample_tokens, spaced_words, word};

fn default_segmenter() -> PhraseSegmenter {
    PhraseSegmenter::from_config(&SubtitleConfig::default())
}

/// Every word of every phrase, in order, without the added punctuation
fn phrase_words(phrases: &[SubtitlePhrase]) -> Vec<String> {
    phrases
        .iter()
        .flat_map(|p| p.text.split_whitespace())
        .map(|w| w.trim_end_matches(['.', '!', '?', ',', ':', ';']).to_lowercase())
        .collect()
}

#[test]
fn test_segment_withShortPause_shouldBuildSinglePhrase() {
    let phrases = default_segmenter().segment(&[word("hello", 0.0, 0.5), word("world", 0.6, 1.0)]);

    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0].text, "Hello world.");
    assert_eq!(phrases[0].start, 0.0);
    assert_eq!(phrases[0].end, 1.0);
}

#[test]
fn test_segment_withLongPause_shouldSplitPhrases() {
    let phrases = default_segmenter().segment(&[word("hi", 0.0, 0.3), word("there", 2.0, 2.3)]);

    assert_eq!(phrases.len(), 2);
    assert_eq!(phrases[0].text, "Hi.");
    assert_eq!(phrases[1].text, "There.");
}

#[test]
fn test_segment_withEmptyInput_shouldReturnNothing() {
    assert!(default_segmenter().segment(&[]).is_empty());
}

#[test]
fn test_segment_withOversizedToken_shouldKeepItAlone() {
    let long_word = "a".repeat(80);
    let tokens = vec![word("short", 0.0, 0.2), word(&long_word, 0.3, 1.0), word("tail", 1.1, 1.3)];

    let phrases = default_segmenter().segment(&tokens);
    assert_eq!(phrases.len(), 3);
    assert_eq!(phrases[1].text, format!("A{}.", &long_word[1..]));
    assert_eq!((phrases[1].start, phrases[1].end), (0.3, 1.0));
}

#[test]
fn test_segment_withCharacterLimit_shouldNotCountSeparators() {
    // 10 + 10 + 10 = 30 chars without spaces; the fourth word would exceed 35
    let segmenter = PhraseSegmenter::new(35, 0.5, 16);
    let tokens: Vec<WordToken> = (0..4)
        .map(|i| word(&"x".repeat(10), i as f64 * 0.2, i as f64 * 0.2 + 0.1))
        .collect();

    let phrases = segmenter.segment(&tokens);
    assert_eq!(phrases.len(), 2);
    assert_eq!(phrases[0].text.split(' ').count(), 3);
}

#[test]
fn test_segment_withWordLimit_shouldSplitAtMaximum() {
    let segmenter = PhraseSegmenter::new(1000, 0.5, 4);
    let phrases = segmenter.segment(&spaced_words(10, 0.1));

    let counts: Vec<usize> = phrases.iter().map(|p| p.text.split(' ').count()).collect();
    assert_eq!(counts, vec![4, 4, 2]);
}

#[test]
fn test_segment_withPunctuation_shouldCloseClause() {
    let tokens = vec![
        word("well,", 0.0, 0.2),
        word("maybe", 0.3, 0.5),
        word("not!", 0.6, 0.8),
        word("ok", 0.9, 1.0),
    ];

    let texts: Vec<String> = default_segmenter().segment(&tokens).into_iter().map(|p| p.text).collect();
    assert_eq!(texts, vec!["Well,", "Maybe not!", "Ok."]);
}

#[test]
fn test_segment_withCyrillicText_shouldCapitalizeFirstLetter() {
    let phrases = default_segmenter().segment(&[word("привет", 0.0, 0.4), word("мир", 0.5, 0.8)]);
    assert_eq!(phrases[0].text, "Привет мир.");
}

#[test]
fn test_segment_withBlankTokens_shouldSkipThem() {
    let tokens = vec![word("one", 0.0, 0.2), word("  ", 0.25, 0.3), word("two", 0.35, 0.5)];
    let phrases = default_segmenter().segment(&tokens);

    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0].text, "One two.");
}

#[test]
fn test_segment_withZeroDurationTokens_shouldStillGroup() {
    let tokens = vec![word("a", 1.0, 1.0), word("b", 1.0, 1.0)];
    let phrases = default_segmenter().segment(&tokens);

    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0].duration(), 0.0);
}

#[test]
fn test_segment_withSampleConversation_shouldCoverEveryTokenInOrder() {
    let tokens = sample_tokens();
    let phrases = default_segmenter().segment(&tokens);

    let expected: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
    assert_eq!(phrase_words(&phrases), expected);
    assert!(phrases.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn test_segment_withManyConfigurations_shouldEndAtLastTokenEnd() {
    let tokens: Vec<WordToken> = (0..60)
        .map(|i| {
            let start = i as f64 * 0.3 + if i % 7 == 0 { 1.0 } else { 0.0 };
            let text = if i % 11 == 5 { format!("w{}.", i) } else { format!("w{}", i) };
            word(&text, start, start + 0.25)
        })
        .collect();

    for (max_chars, max_words) in [(10, 3), (25, 5), (55, 16), (200, 40)] {
        let phrases = PhraseSegmenter::new(max_chars, 0.5, max_words).segment(&tokens);

        let mut remaining = tokens.iter();
        for phrase in &phrases {
            let count = phrase.text.split(' ').count();
            let last = remaining.by_ref().take(count).last().unwrap();
            assert_eq!(phrase.end, last.end);
            assert!(count <= max_words);
        }
        assert!(remaining.next().is_none());
    }
}

#[test]
fn test_normalize_withTenSecondPhrase_shouldClampStart() {
    let normalizer = TimingNormalizer::new(7.2, 0.2);
    let phrase = normalizer.normalize(SubtitlePhrase::new(0.0, 10.0, "Long phrase."));

    assert!((phrase.start - 2.8).abs() < 1e-9);
    assert_eq!(phrase.end, 10.0);
    assert_eq!(phrase.text, "Long phrase.");
}

#[test]
fn test_meetsMinimum_withDefaultConfig_shouldRejectTinyPhrases() {
    let normalizer = TimingNormalizer::from_config(&SubtitleConfig::default());
    assert!(!normalizer.meets_minimum(&SubtitlePhrase::new(5.0, 5.1, "Uh.")));
    assert!(normalizer.meets_minimum(&SubtitlePhrase::new(5.0, 5.5, "Yes.")));
}

#[test]
fn test_wrap_withEightWords_shouldReturnUnchanged() {
    let formatter = TextLayoutFormatter::from_config(&SubtitleConfig::default());
    let text = "one two three four five six seven eight";
    assert_eq!(formatter.wrap(text), text);
}

#[test]
fn test_wrap_withTwentyWords_shouldBreakOnceAtIndexTen() {
    let formatter = TextLayoutFormatter::new(16, 2);
    let text: Vec<String> = (0..20).map(|i| format!("w{}", i)).collect();
    let wrapped = formatter.wrap(&text.join(" "));

    let lines: Vec<&str> = wrapped.split(LINE_BREAK).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], text[..10].join(" "));
    assert_eq!(lines[1], text[10..].join(" "));
}
