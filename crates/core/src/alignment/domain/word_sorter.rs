use super::aligned_word::AlignedWord;

/// Reorders aligned words alphabetically by their text.
///
/// Comparison is by code point and case-sensitive (`"Zebra"` sorts before
/// `"apple"`). Words with identical text keep the order they were spoken in.
pub struct WordSorter;

impl WordSorter {
    pub fn sort(words: &mut [AlignedWord]) {
        // `sort_by` is stable, which is what keeps repeated words in spoken order.
        words.sort_by(|a, b| a.text.cmp(&b.text));
    }

    pub fn is_sorted(words: &[AlignedWord]) -> bool {
        words.windows(2).all(|pair| pair[0].text <= pair[1].text)
    }
}
