//! Arabic script normalization for recitation comparison.
//!
//! Two levels of normalization are exposed: [`strip_marks`] removes only the
//! combining diacritics (tashkeel), while [`normalize`] additionally folds
//! letter variants onto a base form and cleans up whitespace. The comparator
//! needs both levels to tell "diacritics differ" apart from "letters differ".

/// Tatweel (kashida), the elongation character. Carries no phonemic value.
const TATWEEL: char = '\u{0640}';

/// Whether a character is a combining diacritical mark.
///
/// Covers the tanwin forms (U+064B-U+064D), the short vowels fatha, damma
/// and kasra (U+064E-U+0650), shadda (U+0651), sukun (U+0652), and the
/// superscript (dagger) alef (U+0670).
fn is_mark(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0652}' | '\u{0670}')
}

/// Fold a letter variant onto its base letter.
fn fold_letter(c: char) -> char {
    match c {
        // Hamza-bearing alef forms and alef wasla -> bare alef.
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => '\u{0627}',
        // Ta marbuta -> ha.
        '\u{0629}' => '\u{0647}',
        // Alef maqsura -> ya.
        '\u{0649}' => '\u{064A}',
        // Hamza on waw -> waw.
        '\u{0624}' => '\u{0648}',
        // Hamza on ya -> ya.
        '\u{0626}' => '\u{064A}',
        _ => c,
    }
}

/// Remove all combining diacritical marks, leaving letters and whitespace
/// untouched.
pub fn strip_marks(text: &str) -> String {
    text.chars().filter(|&c| !is_mark(c)).collect()
}

/// Whether the text carries any diacritical marks, i.e. whether
/// [`strip_marks`] would change it.
pub fn has_marks(text: &str) -> bool {
    text.chars().any(is_mark)
}

/// Fully normalize text for orthography-insensitive comparison.
///
/// Strips diacritics, folds hamza-bearing alef forms, ta marbuta, alef
/// maqsura and hamza-bearing waw/ya onto their base letters, drops tatweel,
/// and collapses whitespace runs to single spaces with the ends trimmed.
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let folded: String = strip_marks(text)
        .chars()
        .filter(|&c| c != TATWEEL)
        .map(fold_letter)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into words on whitespace. Empty or whitespace-only input
/// yields an empty vector; no empty tokens are produced.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
