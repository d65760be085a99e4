use std::path::{Path, PathBuf};

use hound::SampleFormat;
use thiserror::Error;

use crate::alignment::domain::audio_segment::AudioSegment;
use crate::shared::constants::{EXPECTED_BITS_PER_SAMPLE, EXPECTED_CHANNELS, EXPECTED_SAMPLE_RATE};

#[derive(Error, Debug)]
pub enum WavLoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("failed to read samples from {path}: {source}")]
    Samples {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}

/// Loads PCM samples from a WAV file for the alignment engine.
///
/// Multi-channel audio is averaged down to mono. The sample rate is passed
/// through untouched; anything other than mono 16-bit 16 kHz is logged since
/// the engine expects exactly that.
pub struct WavLoader;

impl WavLoader {
    pub fn load(path: &Path) -> Result<AudioSegment, WavLoadError> {
        let reader = hound::WavReader::open(path).map_err(|e| WavLoadError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec = reader.spec();

        if spec.channels != EXPECTED_CHANNELS
            || spec.bits_per_sample != EXPECTED_BITS_PER_SAMPLE
            || spec.sample_rate != EXPECTED_SAMPLE_RATE
            || spec.sample_format != SampleFormat::Int
        {
            log::warn!(
                "{} is {} channel(s), {}-bit {:?}, {} Hz; alignment expects mono 16-bit PCM at 16000 Hz",
                path.display(),
                spec.channels,
                spec.bits_per_sample,
                spec.sample_format,
                spec.sample_rate
            );
        }

        let samples_err = |e| WavLoadError::Samples {
            path: path.to_path_buf(),
            source: e,
        };

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(samples_err)?,
            SampleFormat::Int => {
                let scale = 1.0 / (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(samples_err)?
            }
        };

        let samples = downmix(&interleaved, spec.channels);
        log::debug!(
            "Loaded {} samples ({:.2}s) from {}",
            samples.len(),
            samples.len() as f64 / spec.sample_rate.max(1) as f64,
            path.display()
        );

        Ok(AudioSegment::new(samples, spec.sample_rate))
    }
}

fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let channels = channels as usize;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
