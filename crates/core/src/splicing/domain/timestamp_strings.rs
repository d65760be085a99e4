use crate::alignment::domain::aligned_word::AlignedWord;

/// Start and end times of the sorted words as the splicer takes them on its
/// command line: every value is followed by a comma, the last one included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimestampStrings {
    pub start_list: String,
    pub end_list: String,
}

impl TimestampStrings {
    pub fn from_words(words: &[AlignedWord]) -> Self {
        let mut start_list = String::new();
        let mut end_list = String::new();

        for word in words {
            start_list.push_str(&format_seconds(word.start_time));
            start_list.push(',');
            end_list.push_str(&format_seconds(word.end_time));
            end_list.push(',');
        }

        Self {
            start_list,
            end_list,
        }
    }

    /// Number of timestamps in each list.
    pub fn entry_count(&self) -> usize {
        self.start_list.matches(',').count()
    }

    pub fn is_empty(&self) -> bool {
        self.start_list.is_empty()
    }

    /// Splits a list back into values. The empty segment after the final
    /// comma is dropped; anything that is not a number is skipped.
    pub fn parse_list(list: &str) -> Vec<f64> {
        list.split(',')
            .filter(|token| !token.is_empty())
            .filter_map(|token| token.trim().parse().ok())
            .collect()
    }
}

/// Keeps a fractional digit on whole seconds (`1.0`, not `1`).
fn format_seconds(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::word_sorter::WordSorter;

    fn word(text: &str, start: f64, end: f64) -> AlignedWord {
        AlignedWord::new(text, start, end)
    }

    #[test]
    fn test_dog_cat_bird_sorted_strings() {
        let mut words = vec![
            word("dog", 0.0, 0.5),
            word("cat", 0.5, 1.0),
            word("bird", 1.0, 1.6),
        ];
        WordSorter::sort(&mut words);
        let ts = TimestampStrings::from_words(&words);
        assert_eq!(ts.start_list, "1.0,0.5,0.0,");
        assert_eq!(ts.end_list, "1.6,1.0,0.5,");
    }

    #[test]
    fn test_empty_words_give_empty_strings() {
        let ts = TimestampStrings::from_words(&[]);
        assert!(ts.is_empty());
        assert_eq!(ts.end_list, "");
        assert_eq!(ts.entry_count(), 0);
    }

    #[test]
    fn test_single_word_keeps_trailing_comma() {
        let ts = TimestampStrings::from_words(&[word("hi", 2.25, 2.5)]);
        assert_eq!(ts.start_list, "2.25,");
        assert_eq!(ts.end_list, "2.5,");
    }

    #[test]
    fn test_entry_count_matches_word_count() {
        let words: Vec<AlignedWord> = (0..7)
            .map(|i| word("w", i as f64 * 0.3, i as f64 * 0.3 + 0.2))
            .collect();
        let ts = TimestampStrings::from_words(&words);
        assert_eq!(ts.entry_count(), words.len());
        assert_eq!(ts.end_list.matches(',').count(), words.len());
    }

    #[test]
    fn test_split_yields_one_token_per_word_in_order() {
        let words = vec![
            word("apple", 3.5, 3.9),
            word("banana", 0.25, 0.75),
            word("cherry", 12.0, 12.125),
        ];
        let ts = TimestampStrings::from_words(&words);

        let mut tokens: Vec<&str> = ts.start_list.split(',').collect();
        assert_eq!(tokens.pop(), Some(""));
        assert_eq!(tokens.len(), words.len());

        let starts = TimestampStrings::parse_list(&ts.start_list);
        let ends = TimestampStrings::parse_list(&ts.end_list);
        let expected_starts: Vec<f64> = words.iter().map(|w| w.start_time).collect();
        let expected_ends: Vec<f64> = words.iter().map(|w| w.end_time).collect();
        assert_eq!(starts, expected_starts);
        assert_eq!(ends, expected_ends);
    }

    #[test]
    fn test_parse_list_skips_garbage() {
        assert_eq!(TimestampStrings::parse_list("1.5,abc,,2.0,"), vec![1.5, 2.0]);
    }
}
