//! Canned translations for greetings and acknowledgements.

/// Lower-cased phrase and its pre-written translation
const PHRASES: &[(&str, &str)] = &[
    ("hi", "হাই"),
    ("hello", "হ্যালো"),
    ("hey", "হেই"),
    ("thanks", "ধন্যবাদ"),
    ("thank you", "ধন্যবাদ"),
    ("ok", "ঠিক আছে"),
    ("okay", "ঠিক আছে"),
    ("yes", "হ্যাঁ"),
    ("no", "না"),
    ("good morning", "সুপ্রভাত"),
    ("good night", "শুভ রাত্রি"),
    ("bye", "বিদায়"),
    ("ধন্যবাদ", "Thank you."),
    ("হ্যাঁ", "Yes."),
    ("না", "No."),
    ("ঠিক আছে", "Okay."),
    ("সুপ্রভাত", "Good morning."),
];

/// Exact, case-insensitive lookup of the trimmed text
pub fn lookup(text: &str) -> Option<&'static str> {
    let key = text.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == key)
        .map(|(_, translation)| *translation)
}
