use std::path::Path;

use crate::pipeline::alphabetize_error::AlphabetizeError;
use crate::pipeline::prepared_audio::PreparedAudio;
use crate::shared::wav_path::is_same_file;
use crate::splicing::domain::audio_splicer::{AudioSplicer, SpliceMode, SpliceRequest};

/// Hands a prepared recording to the splicer to write the alphabetized audio.
pub struct AlphabetizeAudioUseCase {
    splicer: Box<dyn AudioSplicer>,
}

impl AlphabetizeAudioUseCase {
    pub fn new(splicer: Box<dyn AudioSplicer>) -> Self {
        Self { splicer }
    }

    /// Blocks until the splicer finishes. A non-zero exit from the splicer
    /// is an error.
    pub fn execute(
        &self,
        prepared: &PreparedAudio,
        output_path: &Path,
        mode: SpliceMode,
    ) -> Result<(), AlphabetizeError> {
        if prepared.word_count() == 0 {
            return Err(AlphabetizeError::invalid_input(format!(
                "No words were aligned in {}",
                prepared.source().display()
            )));
        }
        if is_same_file(prepared.source(), output_path) {
            return Err(AlphabetizeError::invalid_input(
                "Output file must differ from the input file",
            ));
        }

        let request = SpliceRequest {
            input: prepared.source().to_path_buf(),
            output: output_path.to_path_buf(),
            timestamps: prepared.timestamps().clone(),
            mode,
        };
        self.splicer.splice(&request)?;
        Ok(())
    }
}
