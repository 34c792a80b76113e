//! Composable text preprocessing for NLP.
//!
//! A [`Document`] flows through a sequence of steps, each implementing the
//! [`Transformer`] protocol. Steps belong to one of four categories and must
//! appear in that order:
//!
//! - **cleaners** rewrite the working text (URLs, emails, numbers,
//!   punctuation, line breaks, markup, accents, whitespace)
//! - **tokenizers** split the text into [`Token`]s, once
//! - **normalizers** rewrite each token's normalized form
//! - **embeddings** attach vectors to tokens and the document, once
//!
//! Every step checks its category precondition before touching the document
//! and appends its description to the document's audit log on success. A
//! misordered call fails with [`PipelineError::Sequencing`] and leaves the
//! document unchanged.
//!
//! ## Calling modes
//!
//! `transform` works on an independent copy; `transform_in_place` mutates
//! the caller's document. Both accept plain strings through [`Input`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use textprep::{
//!     BasicTokenizer, CaseTokens, CleanNumber, CleanUrl, Compose, HashedVectors, WordEmbeddings,
//! };
//!
//! let vectors = Arc::new(HashedVectors::new(16, false).unwrap());
//! let pipeline = Compose::new()
//!     .with(CleanUrl::new())
//!     .with(CleanNumber::new())
//!     .with(BasicTokenizer::new())
//!     .with(CaseTokens::default())
//!     .with(WordEmbeddings::new(vectors, "mean").unwrap());
//!
//! let doc = pipeline.run("See https://example.com 42 TIMES").unwrap();
//! assert_eq!(doc.tokens().unwrap().texts(), vec!["see", "times"]);
//! assert_eq!(doc.embedded().unwrap().len(), 16);
//! assert_eq!(doc.steps().len(), 5);
//! ```
//!
//! ## Optional capabilities
//!
//! - `markup` (default): HTML/XML text extraction via `scraper`
//! - `hf-tokenizers`: HuggingFace `tokenizer.json` support
//!
//! Steps that need a disabled capability fail at construction with
//! [`PipelineError::MissingDependency`].

mod cleaners;
mod compose;
mod config;
mod document;
mod embeddings;
mod error;
mod normalizers;
mod token;
mod tokenizers;
mod transformer;
mod validation;

pub use crate::cleaners::{
    collapse_whitespace, strip_accents_ascii, strip_accents_unicode, AccentMode, CleanAccents,
    CleanEmail, CleanEol, CleanMarkup, CleanNumber, CleanPunctuation, CleanUrl, CleanWhitespace,
    MarkupParser, SplitPhrases,
};
pub use crate::compose::Compose;
pub use crate::config::{PipelineConfig, StepConfig, VectorsConfig};
pub use crate::document::{Document, DocumentState, Input};
pub use crate::embeddings::{Aggregation, HashedVectors, KeyedVectors, WordEmbeddings, WordVectors};
pub use crate::error::{PipelineError, Precondition};
pub use crate::normalizers::{
    CaseMode, CaseTokens, RemovePunctuationTokens, RemoveStopWords, ENGLISH_STOP_WORDS,
};
pub use crate::token::{Token, Tokens};
pub use crate::tokenizers::{
    BackendTokenizer, BasicTokenizer, HfTokenizer, Processor, RawToken, TokenizerBackend,
    WordTokenizer,
};
pub use crate::transformer::{run_step, Category, Transformer};
pub use crate::validation::check as check_precondition;
