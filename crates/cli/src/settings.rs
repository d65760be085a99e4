use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use alphabetizer_core::shared::constants::{
    APP_DIR_NAME, DEFAULT_SPLICER_PROGRAM, DEFAULT_SPLICER_SCRIPT, DEFAULT_SPLICE_TIMEOUT_SECS,
};
use alphabetizer_core::splicing::domain::audio_splicer::SpliceMode;

/// Defaults read from `settings.json`; command-line flags win over these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub splicer_program: String,
    pub splicer_args: Vec<String>,
    /// 0 waits forever.
    pub timeout_secs: u64,
    pub mode: String,
    pub acoustic_model: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub g2p: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            splicer_program: DEFAULT_SPLICER_PROGRAM.to_string(),
            splicer_args: vec![DEFAULT_SPLICER_SCRIPT.to_string()],
            timeout_secs: DEFAULT_SPLICE_TIMEOUT_SECS,
            mode: SpliceMode::AtNextWord.to_string(),
            acoustic_model: None,
            dictionary: None,
            g2p: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json"))
    }

    /// Loads the user's settings, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
