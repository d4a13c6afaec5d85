//! Word-level comparison of a recited transcript against canonical verse text.
//!
//! Alignment is by longest common subsequence over the two word lists, with
//! "common" defined by the sensitivity level. LCS keeps the diff aligned
//! after a skipped or inserted word instead of cascading every subsequent
//! word into a mismatch. A substitution therefore surfaces as one skipped
//! canonical word plus one added recited word at the same index; merging the
//! pair into a single wrong-word record is left to callers.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, strip_marks, tokenize};

/// How strictly words must agree to count as matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    /// Words match only if byte-for-byte identical, diacritics included.
    Strict,
    /// Words match modulo diacritics and letter-variant spelling.
    Normal,
    /// Words match if similar enough, absorbing minor mis-speaking.
    Lenient,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::Normal
    }
}

/// Similarity threshold for a lenient match.
const LENIENT_THRESHOLD: f64 = 0.8;

/// Kind of discrepancy between canonical and recited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    /// A canonical word with no aligned recited word.
    Skipped,
    /// A recited word with no aligned canonical word.
    Added,
    /// A substituted word. Never produced by the comparator itself; exists
    /// for callers that merge adjacent skipped/added pairs.
    Wrong,
    /// Letters agree but the spelling differs in diacritics or a letter
    /// variant.
    DiacriticOnly,
}

impl MistakeKind {
    /// Severity is derived from the kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::Skipped | Self::Wrong => Severity::Major,
            Self::Added | Self::DiacriticOnly => Severity::Minor,
        }
    }
}

/// How badly a mistake affects the recitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Major,
    Minor,
}

/// One detected discrepancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistakeRecord {
    pub kind: MistakeKind,
    pub severity: Severity,
    /// The canonical word involved; empty for added words, which have no
    /// canonical counterpart.
    pub correct_text: String,
    /// The recited word involved, if any.
    pub recited_text: Option<String>,
    /// Position in the canonical word list. Added words carry the index
    /// immediately following their nearest preceding aligned word.
    pub word_index: usize,
}

impl MistakeRecord {
    fn new(
        kind: MistakeKind,
        correct_text: String,
        recited_text: Option<String>,
        word_index: usize,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            correct_text,
            recited_text,
            word_index,
        }
    }
}

/// Per-canonical-word verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Correct,
    /// Exists for callers that post-process skipped/added pairs into
    /// substitutions; the comparator itself never emits it.
    Wrong,
    Skipped,
    /// Matched only through letter-variant canonicalization.
    Tashkeel,
}

/// Verdict for one canonical word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordResult {
    /// The canonical word.
    pub word: String,
    pub status: WordStatus,
    /// Similarity to the aligned recited word, 0.0 when skipped.
    pub similarity: f64,
    /// The aligned recited word, if any.
    pub recited: Option<String>,
}

/// Result of comparing a transcript against a canonical verse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub total_words: usize,
    pub correct_words: usize,
    /// Percentage of canonical words recited correctly, 0-100.
    pub accuracy: u8,
    pub mistakes: Vec<MistakeRecord>,
    /// Exactly one entry per canonical word.
    pub word_results: Vec<WordResult>,
}

/// Levenshtein edit distance over chars, so multi-byte Arabic letters count
/// as single edits.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity between two words in `[0, 1]`.
///
/// 1.0 for identical words, 0.9 when only the diacritics or a letter variant
/// differ, otherwise edit distance scaled by the longer word's length.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if strip_marks(a) == strip_marks(b) || normalize(a) == normalize(b) {
        return 0.9;
    }
    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(a, b);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Whether two words count as matching under the sensitivity level.
fn words_match(a: &str, b: &str, sensitivity: Sensitivity) -> bool {
    match sensitivity {
        Sensitivity::Strict => a == b,
        Sensitivity::Normal => normalize(a) == normalize(b),
        Sensitivity::Lenient => word_similarity(a, b) >= LENIENT_THRESHOLD,
    }
}

/// Classify an aligned pair. Both words already matched under the active
/// sensitivity.
fn classify_pair(canonical: &str, recited: &str) -> (WordStatus, f64) {
    if canonical == recited {
        return (WordStatus::Correct, 1.0);
    }
    if strip_marks(canonical) == strip_marks(recited) {
        return (WordStatus::Correct, 0.9);
    }
    if normalize(canonical) == normalize(recited) {
        return (WordStatus::Tashkeel, 0.9);
    }
    // Lenient fuzzy match.
    (WordStatus::Correct, word_similarity(canonical, recited))
}

/// Longest common subsequence of the two word lists under the sensitivity's
/// equality rule. Returns matched `(canonical, recited)` index pairs in
/// ascending order.
fn lcs_pairs(canonical: &[&str], recited: &[&str], sensitivity: Sensitivity) -> Vec<(usize, usize)> {
    let m = canonical.len();
    let n = recited.len();
    let mut table = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if words_match(canonical[i - 1], recited[j - 1], sensitivity) {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if words_match(canonical[i - 1], recited[j - 1], sensitivity)
            && table[i][j] == table[i - 1][j - 1] + 1
        {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

/// Compare a recited transcript against the canonical verse text.
///
/// Total over all inputs: an empty canonical verse yields the vacuously
/// perfect result, and an empty transcript marks every canonical word as
/// skipped.
pub fn compare_recitation(
    canonical: &str,
    recited: &str,
    sensitivity: Sensitivity,
) -> ComparisonResult {
    let canonical_words = tokenize(canonical);
    let recited_words = tokenize(recited);
    let total_words = canonical_words.len();

    if total_words == 0 {
        return ComparisonResult {
            total_words: 0,
            correct_words: 0,
            accuracy: 100,
            mistakes: Vec::new(),
            word_results: Vec::new(),
        };
    }

    let pairs = lcs_pairs(&canonical_words, &recited_words, sensitivity);

    // Canonical index -> aligned recited index.
    let mut aligned: Vec<Option<usize>> = vec![None; total_words];
    for &(ci, rj) in &pairs {
        aligned[ci] = Some(rj);
    }

    // Attach each extra recited word at the index immediately following its
    // nearest preceding aligned word.
    let mut added_at: Vec<Vec<usize>> = vec![Vec::new(); total_words + 1];
    let mut attach = 0usize;
    let mut next_pair = 0usize;
    for rj in 0..recited_words.len() {
        if next_pair < pairs.len() && pairs[next_pair].1 == rj {
            attach = pairs[next_pair].0 + 1;
            next_pair += 1;
        } else {
            added_at[attach].push(rj);
        }
    }

    let mut word_results = Vec::with_capacity(total_words);
    let mut mistakes = Vec::new();
    let mut correct_words = 0usize;

    for ci in 0..=total_words {
        for &rj in &added_at[ci] {
            mistakes.push(MistakeRecord::new(
                MistakeKind::Added,
                String::new(),
                Some(recited_words[rj].to_string()),
                ci,
            ));
        }
        if ci == total_words {
            break;
        }
        let word = canonical_words[ci];
        match aligned[ci] {
            Some(rj) => {
                let recited_word = recited_words[rj];
                let (status, similarity) = classify_pair(word, recited_word);
                if status == WordStatus::Correct {
                    correct_words += 1;
                } else {
                    mistakes.push(MistakeRecord::new(
                        MistakeKind::DiacriticOnly,
                        word.to_string(),
                        Some(recited_word.to_string()),
                        ci,
                    ));
                }
                word_results.push(WordResult {
                    word: word.to_string(),
                    status,
                    similarity,
                    recited: Some(recited_word.to_string()),
                });
            }
            None => {
                mistakes.push(MistakeRecord::new(
                    MistakeKind::Skipped,
                    word.to_string(),
                    None,
                    ci,
                ));
                word_results.push(WordResult {
                    word: word.to_string(),
                    status: WordStatus::Skipped,
                    similarity: 0.0,
                    recited: None,
                });
            }
        }
    }

    let accuracy = (100.0 * correct_words as f64 / total_words as f64).round() as u8;

    ComparisonResult {
        total_words,
        correct_words,
        accuracy,
        mistakes,
        word_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BISMILLAH: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
    const BISMILLAH_BARE: &str = "بسم الله الرحمن الرحيم";

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        // Char-level, not byte-level.
        assert_eq!(levenshtein_distance("بسم", "باسم"), 1);
    }

    #[test]
    fn test_word_similarity() {
        assert_eq!(word_similarity("بسم", "بسم"), 1.0);
        assert_eq!(word_similarity("", ""), 1.0);
        // Diacritics-only difference.
        assert_eq!(word_similarity("بِسْمِ", "بسم"), 0.9);
        // Letter-variant-only difference.
        assert_eq!(word_similarity("إله", "اله"), 0.9);
        assert!(word_similarity("بسم", "نور") < 0.5);
    }

    #[test]
    fn perfect_match() {
        let result = compare_recitation(BISMILLAH, BISMILLAH, Sensitivity::Normal);
        assert_eq!(result.total_words, 4);
        assert_eq!(result.correct_words, 4);
        assert_eq!(result.accuracy, 100);
        assert!(result.mistakes.is_empty());
        assert!(result
            .word_results
            .iter()
            .all(|w| w.status == WordStatus::Correct && w.similarity == 1.0));
    }

    #[test]
    fn empty_transcript_skips_every_word() {
        let result = compare_recitation(BISMILLAH, "", Sensitivity::Normal);
        assert_eq!(result.total_words, 4);
        assert_eq!(result.correct_words, 0);
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.mistakes.len(), 4);
        for mistake in &result.mistakes {
            assert_eq!(mistake.kind, MistakeKind::Skipped);
            assert_eq!(mistake.severity, Severity::Major);
            assert_eq!(mistake.recited_text, None);
        }
        assert!(result
            .word_results
            .iter()
            .all(|w| w.status == WordStatus::Skipped && w.recited.is_none()));
    }

    #[test]
    fn empty_canonical_is_vacuously_perfect() {
        let result = compare_recitation("", "", Sensitivity::Normal);
        assert_eq!(result.total_words, 0);
        assert_eq!(result.accuracy, 100);
        assert!(result.mistakes.is_empty());
        assert!(result.word_results.is_empty());

        // Still vacuous when something was recited against an empty verse.
        let result = compare_recitation("", BISMILLAH, Sensitivity::Normal);
        assert_eq!(result.accuracy, 100);
        assert!(result.mistakes.is_empty());
    }

    #[test]
    fn diacritics_tolerated_in_normal_but_not_strict() {
        let normal = compare_recitation(BISMILLAH, BISMILLAH_BARE, Sensitivity::Normal);
        assert_eq!(normal.accuracy, 100);
        assert!(normal
            .word_results
            .iter()
            .all(|w| w.status == WordStatus::Correct && w.similarity == 0.9));

        let strict = compare_recitation(BISMILLAH, BISMILLAH_BARE, Sensitivity::Strict);
        assert!(strict.accuracy < 100);
    }

    #[test]
    fn missing_word_is_one_skip() {
        // Word 2 of the Bismillah left out.
        let recited = "بِسْمِ الرَّحْمَٰنِ الرَّحِيمِ";
        let result = compare_recitation(BISMILLAH, recited, Sensitivity::Normal);
        assert_eq!(result.total_words, 4);
        assert_eq!(result.correct_words, 3);
        assert_eq!(result.accuracy, 75);
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::Skipped);
        assert_eq!(result.mistakes[0].word_index, 1);
        assert_eq!(result.word_results[1].status, WordStatus::Skipped);
        // Alignment recovers: the words after the skip still match.
        assert_eq!(result.word_results[2].status, WordStatus::Correct);
        assert_eq!(result.word_results[3].status, WordStatus::Correct);
    }

    #[test]
    fn extra_word_is_added_at_following_index() {
        let recited = "بسم الله نور الرحمن الرحيم";
        let result = compare_recitation(BISMILLAH_BARE, recited, Sensitivity::Normal);
        assert_eq!(result.correct_words, 4);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.mistakes.len(), 1);
        let added = &result.mistakes[0];
        assert_eq!(added.kind, MistakeKind::Added);
        assert_eq!(added.severity, Severity::Minor);
        assert_eq!(added.recited_text.as_deref(), Some("نور"));
        assert_eq!(added.word_index, 2);
        assert_eq!(added.correct_text, "");
    }

    #[test]
    fn leading_extra_word_attaches_at_zero() {
        let recited = "نور بسم الله الرحمن الرحيم";
        let result = compare_recitation(BISMILLAH_BARE, recited, Sensitivity::Normal);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::Added);
        assert_eq!(result.mistakes[0].word_index, 0);
    }

    #[test]
    fn substitution_is_skip_plus_add() {
        let recited = "بسم النور الرحمن الرحيم";
        let result = compare_recitation(BISMILLAH_BARE, recited, Sensitivity::Normal);
        assert_eq!(result.correct_words, 3);
        assert_eq!(result.accuracy, 75);
        assert_eq!(result.mistakes.len(), 2);
        let kinds: Vec<MistakeKind> = result.mistakes.iter().map(|m| m.kind).collect();
        assert!(kinds.contains(&MistakeKind::Skipped));
        assert!(kinds.contains(&MistakeKind::Added));
        // Both sit at the substituted position.
        assert!(result.mistakes.iter().all(|m| m.word_index == 1));
    }

    #[test]
    fn letter_variant_match_is_tashkeel_not_correct() {
        // Hamza-bearing alef vs bare alef: equal only after full
        // normalization, so the pair aligns but is not counted correct.
        let result = compare_recitation("إله واحد", "اله واحد", Sensitivity::Normal);
        assert_eq!(result.total_words, 2);
        assert_eq!(result.correct_words, 1);
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.word_results[0].status, WordStatus::Tashkeel);
        assert_eq!(result.word_results[0].similarity, 0.9);
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::DiacriticOnly);
        assert_eq!(result.mistakes[0].severity, Severity::Minor);
    }

    #[test]
    fn lenient_absorbs_minor_misspeaking() {
        // One extra trailing letter on a six-letter word: similarity ~0.86.
        let lenient = compare_recitation("الرحمن الرحيم", "الرحمنو الرحيم", Sensitivity::Lenient);
        assert_eq!(lenient.accuracy, 100);
        assert!(lenient.word_results[0].similarity < 1.0);

        let normal = compare_recitation("الرحمن الرحيم", "الرحمنو الرحيم", Sensitivity::Normal);
        assert!(normal.accuracy < 100);
    }

    #[test]
    fn word_results_len_always_matches_total() {
        for recited in ["", BISMILLAH_BARE, "بسم", "x y z w v u"] {
            let result = compare_recitation(BISMILLAH, recited, Sensitivity::Normal);
            assert_eq!(result.word_results.len(), result.total_words);
        }
    }

    #[test]
    fn default_sensitivity_is_normal() {
        assert_eq!(Sensitivity::default(), Sensitivity::Normal);
    }
}
