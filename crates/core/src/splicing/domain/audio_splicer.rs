use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::timestamp_strings::TimestampStrings;

/// Where each word's clip is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceMode {
    /// Cut when the next word starts. No gaps, but trailing noise before
    /// the next word stays in. Only start times are passed.
    AtNextWord,
    /// Cut at the word's own end time, dropping the silence between words.
    /// Better for noisy audio where some words were not detected.
    AtWordEnd,
}

impl SpliceMode {
    pub const ALL: &[SpliceMode] = &[SpliceMode::AtNextWord, SpliceMode::AtWordEnd];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpliceMode::AtNextWord => "next-word",
            SpliceMode::AtWordEnd => "word-end",
        }
    }
}

impl std::fmt::Display for SpliceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpliceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpliceMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("Splice mode must be 'next-word' or 'word-end', got '{s}'"))
    }
}

/// Everything the external splicer needs for one run.
#[derive(Debug, Clone)]
pub struct SpliceRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub timestamps: TimestampStrings,
    pub mode: SpliceMode,
}

impl SpliceRequest {
    /// Positional arguments: input, output, start list, and the end list
    /// when cutting at word ends.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut args = vec![
            self.input.clone().into_os_string(),
            self.output.clone().into_os_string(),
            OsString::from(&self.timestamps.start_list),
        ];
        if self.mode == SpliceMode::AtWordEnd {
            args.push(OsString::from(&self.timestamps.end_list));
        }
        args
    }
}

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("failed to launch splicer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed while waiting for splicer: {0}")]
    Wait(#[source] std::io::Error),
    #[error("splicer exited with {}{}", describe_code(.code), describe_stderr(.stderr))]
    ExitStatus { code: Option<i32>, stderr: String },
    #[error("splicer did not finish within {timeout:?} and was killed")]
    Timeout { timeout: Duration },
    #[error("splicing was interrupted")]
    Interrupted,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Domain interface for the external tool that cuts and re-joins the audio.
pub trait AudioSplicer: Send {
    /// Blocks until the output file has been written or the splice failed.
    fn splice(&self, request: &SpliceRequest) -> Result<(), SpliceError>;
}
