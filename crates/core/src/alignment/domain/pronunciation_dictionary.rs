use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// CMU-style pronunciation dictionary.
///
/// Each line is `word PH1 PH2 ...`. Alternate pronunciations are written
/// `word(2) ...` and are stored under the base word. Lines starting with
/// `;;;` are comments.
#[derive(Debug, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Vec<String>>>,
}

impl PronunciationDictionary {
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut entries: HashMap<String, Vec<Vec<String>>> = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(head) = parts.next() else {
                continue;
            };
            let phones: Vec<String> = parts.map(str::to_string).collect();
            if phones.is_empty() {
                continue;
            }

            entries
                .entry(base_word(head).to_lowercase())
                .or_default()
                .push(phones);
        }

        Self { entries }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    pub fn pronunciations(&self, word: &str) -> Option<&[Vec<String>]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words not covered by the dictionary, in order, without duplicates.
    pub fn missing_words<'a>(&self, words: &'a [String]) -> Vec<&'a str> {
        let mut missing: Vec<&str> = Vec::new();
        for word in words {
            if !self.contains(word) && !missing.contains(&word.as_str()) {
                missing.push(word);
            }
        }
        missing
    }
}

/// Strips the `(n)` alternate-pronunciation suffix.
fn base_word(head: &str) -> &str {
    match head.find('(') {
        Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = ";;; sample dictionary
cat K AE T
dog D AO G
read R EH D
read(2) R IY D
don't D OW N T
";

    #[test]
    fn test_parse_counts_base_words() {
        let dict = PronunciationDictionary::parse(SAMPLE);
        assert_eq!(dict.len(), 4);
        assert!(!dict.is_empty());
    }

    #[test]
    fn test_alternate_pronunciations_grouped() {
        let dict = PronunciationDictionary::parse(SAMPLE);
        let prons = dict.pronunciations("read").unwrap();
        assert_eq!(prons.len(), 2);
        assert_eq!(prons[1], vec!["R", "IY", "D"]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let dict = PronunciationDictionary::parse(SAMPLE);
        assert!(dict.contains("CAT"));
        assert!(dict.contains("don't"));
        assert!(!dict.contains("bird"));
    }

    #[test]
    fn test_entry_without_phones_is_skipped() {
        let dict = PronunciationDictionary::parse("lonely\ncat K AE T\n");
        assert!(!dict.contains("lonely"));
        assert!(dict.contains("cat"));
    }

    #[test]
    fn test_missing_words_deduplicates() {
        let dict = PronunciationDictionary::parse(SAMPLE);
        let words: Vec<String> = ["cat", "bird", "dog", "bird", "fish"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dict.missing_words(&words), vec!["bird", "fish"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dict = PronunciationDictionary::load(file.path()).unwrap();
        assert!(dict.contains("dog"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = PronunciationDictionary::load(Path::new("/nonexistent/cmudict.dict"));
        assert!(result.is_err());
    }
}
