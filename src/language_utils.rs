use anyhow::{anyhow, Result};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language utilities for ISO codes and the human-readable names shown to users
///
/// Codes are ISO 639-1 (2-letter) or ISO 639-2 (3-letter). Display names map
/// onto the codes used for recognizer models and the translation backend.
/// Language code type
#[derive(Debug, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// @const: ISO 639-2/B codes that differ from their 639-2/T form
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

// @const: Languages offered for recognition and translation, by display name
const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[("English", "en"), ("Russian", "ru")];

/// Separator used in language pair labels
pub const PAIR_SEPARATOR: &str = " → ";

/// Language pairs offered to the user (source → subtitles)
pub const AVAILABLE_LANGUAGE_PAIRS: &[&str] = &[
    "Russian → Russian",
    "Russian → English",
    "English → English",
    "English → Russian",
];

/// Pair selected when nothing else is configured
pub const DEFAULT_LANGUAGE_PAIR: &str = "English → English";

static LANGUAGE_TABLE: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if bibliographic_to_terminology(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = bibliographic_to_terminology(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&part2t)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(|c| c.to_string())
        .unwrap_or(part2t))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Code for a display name from the supported language table (case-insensitive)
pub fn code_for_language_name(name: &str) -> Option<&'static str> {
    LANGUAGE_TABLE.get(&name.trim().to_lowercase()).copied()
}

/// Display names of every supported language
pub fn supported_language_names() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|(name, _)| *name).collect()
}

/// Parse a pair label such as `"English → Russian"` into (source, target) codes.
///
/// `->` is accepted in place of the arrow for shells where typing it is awkward.
pub fn parse_language_pair(pair: &str) -> Result<(String, String)> {
    let arrow = PAIR_SEPARATOR.trim();
    let normalized = pair.replace("->", arrow);
    let (source, target) = normalized
        .split_once(arrow)
        .ok_or_else(|| anyhow!("Invalid language pair '{}', expected 'Source → Target'", pair))?;

    let source_code = code_for_language_name(source)
        .ok_or_else(|| anyhow!("Unsupported source language: {}", source.trim()))?;
    let target_code = code_for_language_name(target)
        .ok_or_else(|| anyhow!("Unsupported target language: {}", target.trim()))?;

    Ok((source_code.to_string(), target_code.to_string()))
}
