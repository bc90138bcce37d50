//! Language selection and model loading
//!
//! Maps language codes to the dependency-parsing model used for them and
//! loads an annotator through a `ModelProvider`, acquiring a missing model
//! at most once.

use serde::{Deserialize, Serialize};

use crate::{Annotator, ModelProvider, Result, WlzError};

/// Languages with a known dependency-parsing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ukrainian,
    English,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ukrainian => "uk",
            Self::English => "en",
        }
    }

    /// Name of the model loaded for this language
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::Ukrainian => "uk_core_news_lg",
            Self::English => "en_core_web_sm",
        }
    }

    /// All supported languages
    pub fn all() -> &'static [Language] {
        &[Self::Ukrainian, Self::English]
    }
}

impl std::str::FromStr for Language {
    type Err = WlzError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|language| language.code() == code)
            .ok_or_else(|| WlzError::UnsupportedLanguage(s.to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Load the annotator for `language`.
///
/// A `ModelUnavailable` error from the first load triggers one acquisition
/// followed by one more load. Any other error, or a failure of the second
/// load, is returned to the caller.
pub fn load_annotator(
    provider: &dyn ModelProvider,
    language: Language,
) -> Result<Box<dyn Annotator>> {
    let model = language.model_name();

    match provider.load(model) {
        Ok(annotator) => Ok(annotator),
        Err(WlzError::ModelUnavailable { reason, .. }) => {
            tracing::warn!(%reason, "Downloading model for {}: {}", language, model);
            provider.acquire(model)?;
            provider.load(model)
        }
        Err(e) => Err(e),
    }
}
