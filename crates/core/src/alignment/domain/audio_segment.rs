/// Mono PCM samples normalized to [-1.0, 1.0], as handed to the alignment engine.
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_at_16k() {
        let seg = AudioSegment::new(vec![0.0; 48000], 16000);
        assert_eq!(seg.duration(), 3.0);
    }

    #[test]
    fn test_duration_zero_rate_is_zero() {
        let seg = AudioSegment::new(vec![0.0; 10], 0);
        assert_eq!(seg.duration(), 0.0);
    }

    #[test]
    fn test_accessors() {
        let seg = AudioSegment::new(vec![0.25, -0.5], 16000);
        assert_eq!(seg.samples(), &[0.25, -0.5]);
        assert_eq!(seg.sample_rate(), 16000);
    }
}
