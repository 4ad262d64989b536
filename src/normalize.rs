//! Post-processing of English provider output.
//!
//! Generic translation APIs return text with stray spaces before punctuation,
//! lower-case starts and whatever terminal punctuation the model guessed. The
//! reply is repaired deterministically, and whether it ends in `?` or `.` is
//! decided from the user's own message rather than from the translation.

use regex::Regex;
use std::sync::LazyLock;

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([?.!,])").expect("static pattern"));

const TERMINAL_PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// Interrogative cues matched as lower-cased substrings of the source text
const QUESTION_CUES: &[&str] = &[
    // English
    "what", "why", "how", "when", "where", "who", "which",
    "do you", "are you", "can you", "did you", "is it",
    // Bangla
    "কি", "কী", "কেন", "কেমন", "কোথায়", "কখন", "কিভাবে", "কীভাবে", "কোন", "নাকি",
    // Roman-Bangla
    "kemon", "keno", "kothay", "kokhon", "kivabe", "naki",
];

/// Heuristic: a literal `?` or any interrogative cue word in the source text
pub fn is_question(source_text: &str) -> bool {
    if source_text.contains('?') {
        return true;
    }

    let lowered = source_text.to_lowercase();
    QUESTION_CUES.iter().any(|cue| lowered.contains(cue))
}

/// Repair an English translation of `source_text` into a chat-ready sentence
pub fn normalize(translated_text: &str, source_text: &str) -> String {
    let text = translated_text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text = SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1");
    let text = capitalize_first_alphabetic(&text);

    let body = text
        .trim_end()
        .trim_end_matches(TERMINAL_PUNCTUATION)
        .trim_end();
    if body.is_empty() {
        return String::new();
    }

    let terminal = if is_question(source_text) { '?' } else { '.' };
    format!("{}{}", body, terminal)
}

fn capitalize_first_alphabetic(text: &str) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((idx, c)) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..idx]);
            out.extend(c.to_uppercase());
            out.push_str(&text[idx + c.len_utf8()..]);
            out
        }
        None => text.to_string(),
    }
}
