//! Tokenizers: turn `cleaned` (or each phrase) into [`Token`]s.
//!
//! When the document carries phrases each one is tokenized independently
//! and the result keeps the grouping ([`Tokens::Phrased`]); otherwise the
//! whole cleaned text becomes one flat sequence.
//!
//! [`BasicTokenizer`] and [`WordTokenizer`] need no optional dependency.
//! [`BackendTokenizer`] delegates to an external [`TokenizerBackend`].

use unicode_segmentation::UnicodeSegmentation;

use crate::document::Document;
use crate::error::PipelineError;
use crate::token::{Token, Tokens};
use crate::transformer::{Category, Transformer};

mod backend;
mod hf;

pub use backend::{BackendTokenizer, Processor, RawToken, TokenizerBackend};
pub use hf::HfTokenizer;

/// Runs `split` over the phrases (or the cleaned text) and installs the
/// resulting tokens.
pub(crate) fn tokenize_document<F>(doc: &mut Document, mut split: F) -> Result<(), PipelineError>
where
    F: FnMut(&str) -> Result<Vec<Token>, PipelineError>,
{
    let tokens = match &doc.phrases {
        Some(phrases) => Tokens::Phrased(
            phrases
                .iter()
                .map(|phrase| split(phrase))
                .collect::<Result<_, _>>()?,
        ),
        None => Tokens::Flat(split(&doc.cleaned)?),
    };
    doc.set_tokens(tokens);
    Ok(())
}

/// Splits on Unicode whitespace. Punctuation stays attached to its word.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTokenizer;

impl BasicTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for BasicTokenizer {
    fn category(&self) -> Category {
        Category::Tokenizers
    }

    fn name(&self) -> &'static str {
        "BasicTokenizer"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        tokenize_document(doc, |text| Ok(text.split_whitespace().map(Token::new).collect()))
    }
}

/// Splits on UAX #29 word boundaries: punctuation and symbols become their
/// own tokens, whitespace is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for WordTokenizer {
    fn category(&self) -> Category {
        Category::Tokenizers
    }

    fn name(&self) -> &'static str {
        "WordTokenizer"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        tokenize_document(doc, |text| {
            Ok(text
                .split_word_bounds()
                .filter(|piece| !piece.trim().is_empty())
                .map(Token::new)
                .collect())
        })
    }
}
