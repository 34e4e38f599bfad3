/*!
 * Tests for language utility functions
 */

use subforge::language_utils::{
    code_for_language_name, get_language_name, language_codes_match, normalize_to_part1_or_part2t,
    normalize_to_part2t, parse_language_pair, supported_language_names, validate_language_code,
    LanguageCodeType, AVAILABLE_LANGUAGE_PAIRS, DEFAULT_LANGUAGE_PAIR, PAIR_SEPARATOR,
};

#[test]
fn test_validateLanguageCode_withVariousCodes_shouldClassify() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("rus").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_withMixedCodes_shouldConvert() {
    assert_eq!(normalize_to_part2t("EN").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part1_or_part2t("rus").unwrap(), "ru");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
}

#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("ru", "RUS"));
    assert!(!language_codes_match("en", "ru"));
    assert!(!language_codes_match("en", "invalid"));
}

#[test]
fn test_getLanguageName_withCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ru").unwrap(), "Russian");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_codeForLanguageName_shouldIgnoreCase() {
    assert_eq!(code_for_language_name("English"), Some("en"));
    assert_eq!(code_for_language_name(" russian "), Some("ru"));
    assert_eq!(code_for_language_name("Klingon"), None);
    assert_eq!(supported_language_names(), vec!["English", "Russian"]);
}

#[test]
fn test_parseLanguagePair_withArrow_shouldReturnCodes() {
    assert_eq!(
        parse_language_pair("English → Russian").unwrap(),
        ("en".to_string(), "ru".to_string())
    );
    assert_eq!(
        parse_language_pair("Russian -> English").unwrap(),
        ("ru".to_string(), "en".to_string())
    );
    assert!(parse_language_pair("English").is_err());
    assert!(parse_language_pair("English → Klingon").is_err());
}

#[test]
fn test_availablePairs_shouldAllParseAndContainDefault() {
    assert!(AVAILABLE_LANGUAGE_PAIRS.contains(&DEFAULT_LANGUAGE_PAIR));
    for pair in AVAILABLE_LANGUAGE_PAIRS {
        assert!(pair.contains(PAIR_SEPARATOR), "{}", pair);
        assert!(parse_language_pair(pair).is_ok(), "{}", pair);
    }
}
