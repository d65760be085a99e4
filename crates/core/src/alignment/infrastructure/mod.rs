pub mod aligner_config;
pub mod wav_loader;
pub mod whisper_aligner;
