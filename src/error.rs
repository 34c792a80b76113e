//! Error types produced by pipeline steps.
//!
//! Every failure is typed, cloneable and comparable so callers (and tests) can
//! match on the exact cause.
//!
//! | Error | When |
//! |-------|------|
//! | [`UnsupportedInput`](PipelineError::UnsupportedInput) | input is neither text nor a document |
//! | [`Sequencing`](PipelineError::Sequencing) | a step ran in the wrong pipeline state |
//! | [`InvalidConfig`](PipelineError::InvalidConfig) | bad mode, processor or aggregation name |
//! | [`MissingDependency`](PipelineError::MissingDependency) | optional capability compiled out |
//! | [`VectorLoad`](PipelineError::VectorLoad) | word-vector file unreadable or malformed |
//! | [`Backend`](PipelineError::Backend) | external capability failed at call time |
//!
//! Construction-time errors (`InvalidConfig`, `MissingDependency`) are raised
//! before any document is touched. Nothing is retried.
use std::fmt;

use thiserror::Error;

/// The state requirement a step category imposes on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// Cleaners only run on untokenized documents.
    CleanBeforeTokenize,
    /// A document is tokenized at most once.
    TokenizeOnce,
    /// Normalizers need tokens and run before embedding.
    NormalizeBeforeEmbed,
    /// Embedders need tokens and run at most once.
    EmbedOnce,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Precondition::CleanBeforeTokenize => "cannot clean an already-tokenized document",
            Precondition::TokenizeOnce => "document already tokenized",
            Precondition::NormalizeBeforeEmbed => {
                "normalizer requires tokens and must precede embedding"
            }
            Precondition::EmbedOnce => "embedder requires tokens and must run at most once",
        };
        f.write_str(msg)
    }
}

/// Errors surfaced by transformers, pipelines and their constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("unsupported input type: {0}")]
    UnsupportedInput(String),
    #[error("{step}: {precondition}")]
    Sequencing {
        step: String,
        precondition: Precondition,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("missing dependency `{capability}`: {hint}")]
    MissingDependency {
        capability: &'static str,
        hint: &'static str,
    },
    #[error("failed to load word vectors: {0}")]
    VectorLoad(String),
    #[error("backend failure: {0}")]
    Backend(String),
}

impl PipelineError {
    /// True when a step was applied in an order the pipeline forbids.
    pub fn is_sequencing(&self) -> bool {
        matches!(self, PipelineError::Sequencing { .. })
    }

    /// True for errors raised while building a step rather than running it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidConfig(_) | PipelineError::MissingDependency { .. }
        )
    }
}
