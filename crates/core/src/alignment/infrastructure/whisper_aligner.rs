use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::alignment::domain::aligned_word::AlignedWord;
use crate::alignment::domain::audio_segment::AudioSegment;
use crate::alignment::domain::pronunciation_dictionary::PronunciationDictionary;
use crate::alignment::domain::speech_aligner::SpeechAligner;
use crate::alignment::domain::transcript_matcher::TranscriptMatcher;
use crate::alignment::infrastructure::aligner_config::AlignerConfig;
use crate::alignment::infrastructure::wav_loader::WavLoader;
use crate::shared::constants::WHISPER_LANGUAGE;
use crate::shared::model_resolver::ProgressFn;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Aligner backed by whisper.cpp via whisper-rs.
///
/// The transcript is given to the engine as its initial prompt, the
/// recognized tokens are merged into timed words, and those are matched back
/// against the transcript.
#[derive(Debug)]
pub struct WhisperAligner {
    model_path: PathBuf,
    language: String,
    dictionary: Option<PronunciationDictionary>,
    has_g2p: bool,
}

impl WhisperAligner {
    pub fn new(model_path: &Path) -> Result<Self, BoxError> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            language: WHISPER_LANGUAGE.to_string(),
            dictionary: None,
            has_g2p: false,
        })
    }

    /// Resolves the acoustic model and loads the dictionary named in `config`.
    pub fn from_config(config: &AlignerConfig, progress: Option<ProgressFn>) -> Result<Self, BoxError> {
        let model_path = config.resolve_acoustic_model(progress)?;
        let mut aligner = Self::new(&model_path)?;
        aligner.language = config.language.clone();

        if let Some(path) = config.dictionary_path() {
            let dictionary = PronunciationDictionary::load(path)
                .map_err(|e| format!("Failed to load dictionary {}: {e}", path.display()))?;
            log::info!("Loaded {} dictionary entries from {}", dictionary.len(), path.display());
            aligner.dictionary = Some(dictionary);
        }

        if let Some(path) = config.g2p_path() {
            if !path.is_file() {
                return Err(format!("g2p resource not found at: {}", path.display()).into());
            }
            aligner.has_g2p = true;
        }

        Ok(aligner)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn report_unknown_words(&self, words: &[String]) {
        let Some(dictionary) = &self.dictionary else {
            return;
        };
        for word in words {
            if let Some(variants) = dictionary.pronunciations(word) {
                log::trace!("'{word}' has {} pronunciation(s)", variants.len());
            }
        }
        for word in dictionary.missing_words(words) {
            if self.has_g2p {
                log::debug!("'{word}' is not in the dictionary; relying on g2p");
            } else {
                log::warn!("'{word}' is not in the dictionary and may not be aligned");
            }
        }
    }

    fn recognize(&self, audio: &AudioSegment, prompt: &str) -> Result<Vec<AlignedWord>, BoxError> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.language.as_str()));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_initial_prompt(prompt);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut tokens = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            for tok_idx in 0..segment.n_tokens() {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };
                let text = match token.to_str() {
                    Ok(t) => t.to_string(),
                    Err(_) => continue,
                };

                // Token timestamps are in centiseconds
                let data = token.token_data();
                tokens.push(TimedToken {
                    text,
                    start_time: data.t0 as f64 / 100.0,
                    end_time: data.t1 as f64 / 100.0,
                });
            }
        }

        Ok(merge_tokens(tokens))
    }
}

impl SpeechAligner for WhisperAligner {
    fn align(&self, audio_path: &Path, transcript: &str) -> Result<Vec<AlignedWord>, BoxError> {
        let audio = WavLoader::load(audio_path)?;
        let expected = TranscriptMatcher::tokenize(transcript);
        self.report_unknown_words(&expected);

        let recognized = self.recognize(&audio, transcript)?;
        log::debug!(
            "Engine recognized {} words for {} transcript words",
            recognized.len(),
            expected.len()
        );

        Ok(TranscriptMatcher::match_words(&recognized, &expected))
    }
}

struct TimedToken {
    text: String,
    start_time: f64,
    end_time: f64,
}

/// Joins sub-word tokens into words. A token that starts with a space opens
/// a new word; anything else extends the previous one. A word whose first
/// token has reversed timestamps is dropped along with its continuations.
fn merge_tokens(tokens: Vec<TimedToken>) -> Vec<AlignedWord> {
    let mut words: Vec<AlignedWord> = Vec::new();
    let mut skipping = false;

    for token in tokens {
        let piece = token.text.trim();
        // Special tokens look like [_BEG_] or <|endoftext|>
        if piece.is_empty() || piece.starts_with('[') || piece.starts_with('<') {
            continue;
        }

        let continues_word = !token.text.starts_with(' ');
        if continues_word && skipping {
            continue;
        }
        if continues_word {
            if let Some(last) = words.last_mut() {
                last.text.push_str(piece);
                last.end_time = last.end_time.max(token.end_time);
                continue;
            }
        }

        skipping = token.end_time < token.start_time;
        if skipping {
            log::debug!(
                "Dropping '{piece}' with reversed timestamps {:.2}-{:.2}",
                token.start_time,
                token.end_time
            );
            continue;
        }
        words.push(AlignedWord::new(piece, token.start_time, token.end_time));
    }

    words
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::infrastructure::aligner_config::ModelRef;

    fn token(text: &str, start: f64, end: f64) -> TimedToken {
        TimedToken {
            text: text.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn test_new_nonexistent_path_returns_error() {
        let result = WhisperAligner::new(Path::new("/nonexistent/model.bin"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("not found"), "Expected 'not found' in error, got: {err}");
    }

    #[test]
    fn test_from_config_missing_dictionary_errors() {
        let model = tempfile::NamedTempFile::new().unwrap();
        let config = AlignerConfig::default()
            .with_acoustic_model(ModelRef::Path(model.path().to_path_buf()))
            .with_dictionary(Some(PathBuf::from("/nonexistent/cmudict.dict")));
        let err = WhisperAligner::from_config(&config, None).unwrap_err().to_string();
        assert!(err.contains("dictionary"), "got: {err}");
    }

    #[test]
    fn test_from_config_missing_g2p_errors() {
        let model = tempfile::NamedTempFile::new().unwrap();
        let config = AlignerConfig::default()
            .with_acoustic_model(ModelRef::Path(model.path().to_path_buf()))
            .with_g2p(Some(PathBuf::from("/nonexistent/g2p.fst")));
        let err = WhisperAligner::from_config(&config, None).unwrap_err().to_string();
        assert!(err.contains("g2p"), "got: {err}");
    }

    #[test]
    fn test_align_unreadable_audio_errors_before_inference() {
        let model = tempfile::NamedTempFile::new().unwrap();
        let aligner = WhisperAligner::new(model.path()).unwrap();
        let result = aligner.align(Path::new("/nonexistent/clip.wav"), "dog cat bird");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_tokens_joins_subwords() {
        let words = merge_tokens(vec![
            token(" alpha", 0.0, 0.3),
            token("bet", 0.3, 0.5),
            token(" soup", 0.6, 1.0),
        ]);
        assert_eq!(
            words,
            vec![
                AlignedWord::new("alphabet", 0.0, 0.5),
                AlignedWord::new("soup", 0.6, 1.0),
            ]
        );
    }

    #[test]
    fn test_merge_tokens_skips_special_tokens() {
        let words = merge_tokens(vec![
            token("[_BEG_]", 0.0, 0.0),
            token(" dog", 0.0, 0.5),
            token("<|endoftext|>", 0.5, 0.5),
        ]);
        assert_eq!(words, vec![AlignedWord::new("dog", 0.0, 0.5)]);
    }

    #[test]
    fn test_merge_tokens_first_token_without_space_starts_word() {
        let words = merge_tokens(vec![token("cat", 0.1, 0.4), token(",", 0.4, 0.45)]);
        assert_eq!(words, vec![AlignedWord::new("cat,", 0.1, 0.45)]);
    }

    #[test]
    fn test_merge_tokens_drops_reversed_timestamps() {
        let words = merge_tokens(vec![token(" bad", 1.0, 0.5), token(" good", 1.0, 1.2)]);
        assert_eq!(words, vec![AlignedWord::new("good", 1.0, 1.2)]);
    }

    #[test]
    fn test_merge_tokens_drops_continuations_of_reversed_word() {
        let words = merge_tokens(vec![
            token(" dog", 0.0, 0.5),
            token(" alpha", 0.9, 0.6),
            token("bet", 0.9, 1.2),
            token(" cat", 1.2, 1.5),
        ]);
        assert_eq!(
            words,
            vec![
                AlignedWord::new("dog", 0.0, 0.5),
                AlignedWord::new("cat", 1.2, 1.5),
            ]
        );
    }

    #[test]
    fn test_merge_tokens_reversed_first_token_drops_its_continuations() {
        let words = merge_tokens(vec![token("alpha", 0.9, 0.6), token("bet", 0.9, 1.2)]);
        assert!(words.is_empty());
    }
}
