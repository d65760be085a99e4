/// A transcript word located in the recording, times in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedWord {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl AlignedWord {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

impl std::fmt::Display for AlignedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}, [{:.3}s:{:.3}s]}}", self.text, self.start_time, self.end_time)
    }
}
