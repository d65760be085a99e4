use std::path::Path;

use alphabetizer_core::alignment::domain::aligned_word::AlignedWord;
use alphabetizer_core::alignment::domain::speech_aligner::SpeechAligner;
use alphabetizer_core::pipeline::alphabetize_audio_use_case::AlphabetizeAudioUseCase;
use alphabetizer_core::pipeline::alphabetize_error::AlphabetizeError;
use alphabetizer_core::pipeline::prepare_audio_use_case::PrepareAudioUseCase;
use alphabetizer_core::splicing::domain::audio_splicer::SpliceMode;
use alphabetizer_core::splicing::infrastructure::script_splicer::ScriptSplicer;

struct FixedAligner(Vec<AlignedWord>);

impl SpeechAligner for FixedAligner {
    fn align(
        &self,
        _: &Path,
        _: &str,
    ) -> Result<Vec<AlignedWord>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.clone())
    }
}

fn dog_cat_bird() -> FixedAligner {
    FixedAligner(vec![
        AlignedWord::new("dog", 0.0, 0.5),
        AlignedWord::new("cat", 0.5, 1.0),
        AlignedWord::new("bird", 1.0, 1.6),
    ])
}

#[test]
fn test_mp3_input_fails_before_splicing() {
    let prepare = PrepareAudioUseCase::new(Box::new(dog_cat_bird()));
    let result = prepare.execute(Path::new("speech.mp3"), "dog cat bird");
    assert!(matches!(result, Err(AlphabetizeError::InvalidInput { .. })));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_splicer(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("splice.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_prepare_then_splice_at_word_end() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("speech.wav");
        fs::write(&input, b"RIFF").unwrap();
        let output = tmp.path().join("alphabetical.wav");
        let script = write_splicer(tmp.path(), r#"printf '%s\n' "$3" "$4" > "$2""#);

        let prepared = PrepareAudioUseCase::new(Box::new(dog_cat_bird()))
            .execute(&input, "dog cat bird")
            .unwrap();
        let splicer = ScriptSplicer::new(script.to_string_lossy(), vec![]);
        AlphabetizeAudioUseCase::new(Box::new(splicer))
            .execute(&prepared, &output, SpliceMode::AtWordEnd)
            .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "1.0,0.5,0.0,\n1.6,1.0,0.5,\n");
    }

    #[test]
    fn test_failing_splicer_surfaces_error() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("speech.wav");
        fs::write(&input, b"RIFF").unwrap();
        let script = write_splicer(tmp.path(), "exit 1");

        let prepared = PrepareAudioUseCase::new(Box::new(dog_cat_bird()))
            .execute(&input, "dog cat bird")
            .unwrap();
        let splicer = ScriptSplicer::new(script.to_string_lossy(), vec![]);
        let result = AlphabetizeAudioUseCase::new(Box::new(splicer)).execute(
            &prepared,
            &tmp.path().join("out.wav"),
            SpliceMode::AtNextWord,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, AlphabetizeError::Splice(_)));
        assert!(err.to_string().contains("exit code 1"), "got: {err}");
    }
}
