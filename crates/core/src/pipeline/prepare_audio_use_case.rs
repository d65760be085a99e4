use std::path::Path;

use crate::alignment::domain::speech_aligner::SpeechAligner;
use crate::alignment::domain::word_sorter::WordSorter;
use crate::pipeline::alphabetize_error::AlphabetizeError;
use crate::pipeline::prepared_audio::PreparedAudio;
use crate::shared::wav_path::{ensure_readable_file, has_wav_extension};

/// Preparation pipeline: validate → align → sort → serialize timestamps.
pub struct PrepareAudioUseCase {
    aligner: Box<dyn SpeechAligner>,
}

impl PrepareAudioUseCase {
    pub fn new(aligner: Box<dyn SpeechAligner>) -> Self {
        Self { aligner }
    }

    /// Aligns `transcript` against the WAV file at `audio_path` and returns
    /// its words in alphabetical order. Each call is independent.
    pub fn execute(
        &self,
        audio_path: &Path,
        transcript: &str,
    ) -> Result<PreparedAudio, AlphabetizeError> {
        // 1. Reject anything that is not a .wav before touching the engine
        if !has_wav_extension(audio_path) {
            return Err(AlphabetizeError::invalid_input(format!(
                "Audio file must be in WAV format: {}",
                audio_path.display()
            )));
        }
        if transcript.trim().is_empty() {
            return Err(AlphabetizeError::invalid_input("Transcript is empty"));
        }
        ensure_readable_file(audio_path)
            .map_err(|e| AlphabetizeError::io(format!("opening {}", audio_path.display()), e))?;

        // 2. Align
        log::info!("Aligning {}", audio_path.display());
        let mut words = self
            .aligner
            .align(audio_path, transcript)
            .map_err(AlphabetizeError::Alignment)?;

        for word in &words {
            log::debug!("{word}");
        }
        log::info!("Number of words: {}", words.len());

        // 3. Sort alphabetically
        WordSorter::sort(&mut words);
        log::debug!(
            "Alphabetical order: {}",
            words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        );

        // 4. Timestamps are derived from the sorted words
        let prepared = PreparedAudio::new(audio_path.to_path_buf(), words);
        log::debug!("Start timestamps: {}", prepared.timestamps().start_list);
        log::debug!("End timestamps: {}", prepared.timestamps().end_list);

        Ok(prepared)
    }
}
