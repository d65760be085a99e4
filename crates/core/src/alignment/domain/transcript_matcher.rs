use super::aligned_word::AlignedWord;

/// Matches words recognized by the engine against the expected transcript.
///
/// Uses a longest-common-subsequence match over normalized words, so
/// recognition errors and skipped words on either side do not shift the
/// remaining timings. Only transcript words that were heard are returned.
pub struct TranscriptMatcher;

impl TranscriptMatcher {
    /// Splits a transcript into words with surrounding punctuation removed.
    pub fn tokenize(transcript: &str) -> Vec<String> {
        transcript
            .split_whitespace()
            .map(trim_punctuation)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lowercases and trims punctuation, keeping inner apostrophes.
    pub fn normalize(word: &str) -> String {
        trim_punctuation(word).to_lowercase()
    }

    pub fn match_words(recognized: &[AlignedWord], transcript: &[String]) -> Vec<AlignedWord> {
        let heard: Vec<String> = recognized.iter().map(|w| Self::normalize(&w.text)).collect();
        let expected: Vec<String> = transcript.iter().map(|w| Self::normalize(w)).collect();

        let n = heard.len();
        let m = expected.len();
        if n == 0 || m == 0 {
            return Vec::new();
        }

        // lcs[i][j] = LCS length of heard[i..] and expected[j..]
        let mut lcs = vec![vec![0u32; m + 1]; n + 1];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                lcs[i][j] = if !heard[i].is_empty() && heard[i] == expected[j] {
                    lcs[i + 1][j + 1] + 1
                } else {
                    lcs[i + 1][j].max(lcs[i][j + 1])
                };
            }
        }

        let mut matched = Vec::with_capacity(lcs[0][0] as usize);
        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            if !heard[i].is_empty() && heard[i] == expected[j] {
                let timing = &recognized[i];
                matched.push(AlignedWord::new(
                    transcript[j].clone(),
                    timing.start_time,
                    timing.end_time,
                ));
                i += 1;
                j += 1;
            } else if lcs[i + 1][j] >= lcs[i][j + 1] {
                i += 1;
            } else {
                j += 1;
            }
        }

        matched
    }
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}
