use std::path::{Path, PathBuf};

use crate::alignment::domain::aligned_word::AlignedWord;
use crate::splicing::domain::timestamp_strings::TimestampStrings;

/// Result of preparing one recording: its words in alphabetical order and
/// the timestamp lists handed to the splicer.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedAudio {
    source: PathBuf,
    words: Vec<AlignedWord>,
    timestamps: TimestampStrings,
}

impl PreparedAudio {
    /// `words` must already be sorted; the timestamps are derived from them.
    pub fn new(source: PathBuf, words: Vec<AlignedWord>) -> Self {
        let timestamps = TimestampStrings::from_words(&words);
        Self {
            source,
            words,
            timestamps,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn words(&self) -> &[AlignedWord] {
        &self.words
    }

    pub fn timestamps(&self) -> &TimestampStrings {
        &self.timestamps
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
