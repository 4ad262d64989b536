//! Script detection and target-language selection.
//!
//! Both steps are pure functions of the message text and run before any
//! provider is contacted, so the target language never depends on what a
//! translation service answers.

/// Transliterated Bangla words that mark a Latin-script message as Roman-Bangla.
///
/// Matching is substring-based on the lower-cased text, so a keyword embedded
/// in an unrelated English word ("skip" contains "ki") also matches.
pub const ROMAN_BANGLA_KEYWORDS: &[&str] = &[
    "ami", "tumi", "apni", "kemon", "acho", "achen",
    "ki", "korcho", "korchen", "valo", "bhalo",
    "thik", "achhi", "achi",
];

const BENGALI_BLOCK_START: char = '\u{0980}';
const BENGALI_BLOCK_END: char = '\u{09FF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClassification {
    BanglaScript,
    RomanBanglaLike,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationTarget {
    English,
    Bangla,
}

impl TranslationTarget {
    /// ISO 639-1 code sent to providers
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Bangla => "bn",
        }
    }
}

impl std::fmt::Display for TranslationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// True if the character lies in the Bengali Unicode block (U+0980–U+09FF)
pub fn is_bengali_char(c: char) -> bool {
    (BENGALI_BLOCK_START..=BENGALI_BLOCK_END).contains(&c)
}

pub fn contains_bengali(text: &str) -> bool {
    text.chars().any(is_bengali_char)
}

/// Classify a message by script. Bengali characters win over Roman-Bangla keywords.
pub fn classify(text: &str) -> ScriptClassification {
    if contains_bengali(text) {
        return ScriptClassification::BanglaScript;
    }

    let lowered = text.to_lowercase();
    if ROMAN_BANGLA_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        ScriptClassification::RomanBanglaLike
    } else {
        ScriptClassification::Other
    }
}

pub fn select_target(classification: ScriptClassification) -> TranslationTarget {
    match classification {
        ScriptClassification::BanglaScript | ScriptClassification::RomanBanglaLike => {
            TranslationTarget::English
        }
        ScriptClassification::Other => TranslationTarget::Bangla,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bengali_characters_classify_as_bangla() {
        assert_eq!(classify("কেমন আছো"), ScriptClassification::BanglaScript);
        assert_eq!(classify("ok ঠিক"), ScriptClassification::BanglaScript);
        // block boundaries
        assert_eq!(classify("\u{0980}"), ScriptClassification::BanglaScript);
        assert_eq!(classify("\u{09FF}"), ScriptClassification::BanglaScript);
        assert_eq!(classify("\u{0A00}"), ScriptClassification::Other);
    }

    #[test]
    fn test_bangla_script_takes_precedence_over_keywords() {
        let text = "ami tumi আমি";
        assert_eq!(classify(text), ScriptClassification::BanglaScript);
        assert_eq!(select_target(classify(text)), TranslationTarget::English);
    }

    #[test]
    fn test_roman_bangla_keywords() {
        assert_eq!(classify("ami bhalo achi"), ScriptClassification::RomanBanglaLike);
        assert_eq!(classify("Tumi KEMON acho?"), ScriptClassification::RomanBanglaLike);
        assert_eq!(classify("thik ache"), ScriptClassification::RomanBanglaLike);
    }

    #[test]
    fn test_keyword_matching_is_substring_based() {
        // "skip" contains "ki", "Miami" contains "ami": both are accepted false positives
        assert_eq!(classify("skip this"), ScriptClassification::RomanBanglaLike);
        assert_eq!(classify("Miami is warm"), ScriptClassification::RomanBanglaLike);
        assert_eq!(classify("the apnix server"), ScriptClassification::RomanBanglaLike);
    }

    #[test]
    fn test_other_text() {
        assert_eq!(classify("Good evening"), ScriptClassification::Other);
        assert_eq!(classify("1234 !!"), ScriptClassification::Other);
        assert_eq!(classify(""), ScriptClassification::Other);
        assert_eq!(classify("Hello world"), ScriptClassification::Other);
    }

    #[test]
    fn test_select_target_is_total() {
        assert_eq!(select_target(ScriptClassification::BanglaScript), TranslationTarget::English);
        assert_eq!(select_target(ScriptClassification::RomanBanglaLike), TranslationTarget::English);
        assert_eq!(select_target(ScriptClassification::Other), TranslationTarget::Bangla);
    }

    #[test]
    fn test_target_codes() {
        assert_eq!(TranslationTarget::English.code(), "en");
        assert_eq!(TranslationTarget::Bangla.to_string(), "bn");
    }
}
