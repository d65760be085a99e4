use std::path::Path;

use super::aligned_word::AlignedWord;

/// Domain interface for the external alignment engine.
///
/// Implementations locate each transcript word in the recording and return
/// the words in spoken order. Words the engine cannot find are left out.
pub trait SpeechAligner: Send {
    fn align(
        &self,
        audio_path: &Path,
        transcript: &str,
    ) -> Result<Vec<AlignedWord>, Box<dyn std::error::Error + Send + Sync>>;
}
