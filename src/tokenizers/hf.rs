//! Hugging Face `tokenizer.json` backend.
//!
//! Compiled only with the `hf-tokenizers` feature. Without it the type still
//! exists so configuration code builds, but construction reports the missing
//! dependency.

use std::path::Path;

use crate::error::PipelineError;

use super::{RawToken, TokenizerBackend};

#[cfg(feature = "hf-tokenizers")]
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

#[cfg(not(feature = "hf-tokenizers"))]
pub struct HfTokenizer {
    _unavailable: (),
}

#[cfg(feature = "hf-tokenizers")]
impl HfTokenizer {
    /// Loads a serialized tokenizer. Fails immediately if the file is missing
    /// or not a valid `tokenizer.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path).map_err(|err| {
            PipelineError::Backend(format!("cannot load tokenizer {}: {err}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "hf_tokenizer_loaded");
        Ok(Self { inner })
    }
}

#[cfg(not(feature = "hf-tokenizers"))]
impl HfTokenizer {
    pub fn from_file(_path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        Err(PipelineError::MissingDependency {
            capability: "hf-tokenizers",
            hint: "rebuild textprep with the `hf-tokenizers` cargo feature enabled",
        })
    }
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer").finish_non_exhaustive()
    }
}

impl TokenizerBackend for HfTokenizer {
    fn id(&self) -> &str {
        "hf"
    }

    #[cfg(feature = "hf-tokenizers")]
    fn tokenize(&self, text: &str) -> Result<Vec<RawToken>, PipelineError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|err| PipelineError::Backend(err.to_string()))?;
        Ok(encoding.get_tokens().iter().map(RawToken::new).collect())
    }

    #[cfg(not(feature = "hf-tokenizers"))]
    fn tokenize(&self, _text: &str) -> Result<Vec<RawToken>, PipelineError> {
        Err(PipelineError::MissingDependency {
            capability: "hf-tokenizers",
            hint: "rebuild textprep with the `hf-tokenizers` cargo feature enabled",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "hf-tokenizers"))]
    #[test]
    fn construction_fails_without_feature() {
        let err = HfTokenizer::from_file("tokenizer.json").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingDependency { capability: "hf-tokenizers", .. }
        ));
    }

    #[cfg(feature = "hf-tokenizers")]
    #[test]
    fn missing_file_fails_fast() {
        let err = HfTokenizer::from_file("/nonexistent/tokenizer.json").unwrap_err();
        assert!(matches!(err, PipelineError::Backend(_)));
    }
}
