use std::path::{Path, PathBuf};

use crate::shared::constants::{WHISPER_LANGUAGE, WHISPER_MODEL_NAME, WHISPER_MODEL_URL};
use crate::shared::model_resolver::{self, ModelResolveError, ProgressFn};

/// Where the acoustic model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRef {
    /// The default English model, cached locally and downloaded on first use.
    Bundled,
    Path(PathBuf),
}

impl ModelRef {
    /// `"bundled"` or `"default"` select the bundled model; anything else is a path.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "bundled" | "default" => ModelRef::Bundled,
            other => ModelRef::Path(PathBuf::from(other)),
        }
    }
}

/// Engine configuration: acoustic model, dictionary and g2p resource.
#[derive(Debug, Clone)]
pub struct AlignerConfig {
    pub acoustic_model: ModelRef,
    pub dictionary: Option<PathBuf>,
    pub g2p: Option<PathBuf>,
    pub language: String,
    /// Directory searched for the bundled model before downloading.
    pub bundled_dir: Option<PathBuf>,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            acoustic_model: ModelRef::Bundled,
            dictionary: None,
            g2p: None,
            language: WHISPER_LANGUAGE.to_string(),
            bundled_dir: None,
        }
    }
}

impl AlignerConfig {
    pub fn with_acoustic_model(mut self, model: ModelRef) -> Self {
        self.acoustic_model = model;
        self
    }

    pub fn with_dictionary(mut self, dictionary: Option<PathBuf>) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn with_g2p(mut self, g2p: Option<PathBuf>) -> Self {
        self.g2p = g2p;
        self
    }

    /// Returns a local path to the acoustic model, downloading the bundled
    /// model if it is not cached yet.
    pub fn resolve_acoustic_model(
        &self,
        progress: Option<ProgressFn>,
    ) -> Result<PathBuf, ModelResolveError> {
        match &self.acoustic_model {
            ModelRef::Path(path) => Ok(path.clone()),
            ModelRef::Bundled => model_resolver::resolve(
                WHISPER_MODEL_NAME,
                WHISPER_MODEL_URL,
                self.bundled_dir.as_deref(),
                progress,
            ),
        }
    }

    pub fn dictionary_path(&self) -> Option<&Path> {
        self.dictionary.as_deref()
    }

    pub fn g2p_path(&self) -> Option<&Path> {
        self.g2p.as_deref()
    }
}
