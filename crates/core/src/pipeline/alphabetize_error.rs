use thiserror::Error;

use crate::splicing::domain::audio_splicer::SpliceError;

#[derive(Error, Debug)]
pub enum AlphabetizeError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("alignment failed: {0}")]
    Alignment(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

impl AlphabetizeError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = AlphabetizeError::invalid_input("Audio file must be in WAV format");
        assert_eq!(err.to_string(), "invalid input: Audio file must be in WAV format");
    }

    #[test]
    fn test_io_message_includes_context() {
        let err = AlphabetizeError::io(
            "opening clip.wav",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error while opening clip.wav: missing");
    }

    #[test]
    fn test_alignment_error_keeps_engine_message() {
        let err = AlphabetizeError::Alignment("engine exploded".into());
        assert!(err.to_string().contains("engine exploded"));
    }

    #[test]
    fn test_splice_error_is_transparent() {
        let err = AlphabetizeError::from(SpliceError::Interrupted);
        assert_eq!(err.to_string(), SpliceError::Interrupted.to_string());
    }
}
