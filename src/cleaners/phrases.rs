use unicode_segmentation::UnicodeSegmentation;

use crate::document::Document;
use crate::error::PipelineError;
use crate::transformer::{Category, Transformer};

/// Segments `cleaned` into sentences (UAX #29) and stores them as
/// `phrases`, trimmed, empty ones dropped.
///
/// Segmentation belongs before tokenization, so it is checked like a
/// cleaner. Cleaners that run afterwards rewrite every phrase along with
/// `cleaned`. Tokenizers then emit one token group per phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitPhrases;

impl SplitPhrases {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for SplitPhrases {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "SplitPhrases"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        let phrases = doc
            .cleaned
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .map(String::from)
            .collect();
        doc.phrases = Some(phrases);
        Ok(())
    }
}
