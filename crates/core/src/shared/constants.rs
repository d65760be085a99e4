pub const WHISPER_MODEL_NAME: &str = "ggml-base.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin";
pub const WHISPER_LANGUAGE: &str = "en";

/// Format the alignment engine expects: mono, 16-bit PCM, 16 kHz.
pub const EXPECTED_SAMPLE_RATE: u32 = 16000;
pub const EXPECTED_BITS_PER_SAMPLE: u16 = 16;
pub const EXPECTED_CHANNELS: u16 = 1;

pub const WAV_EXTENSION: &str = "wav";

pub const DEFAULT_SPLICER_PROGRAM: &str = "python";
pub const DEFAULT_SPLICER_SCRIPT: &str = "spliceAudio.py";
pub const DEFAULT_SPLICE_TIMEOUT_SECS: u64 = 300;

pub const APP_DIR_NAME: &str = "Alphabetizer";
