//! Embedding steps: attach a vector to every token and reduce them into a
//! document vector.
//!
//! Lookups go through the [`WordVectors`] capability using each token's
//! current form. Unknown words get a zero vector instead of failing the
//! document. Embedding is terminal: once `Document::embedded` is set no
//! normalizer or second embedder may run.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::document::Document;
use crate::error::{PipelineError, Precondition};
use crate::transformer::{quoted, Category, Transformer};

mod normalize;
mod vectors;

pub use vectors::{HashedVectors, KeyedVectors, WordVectors};

use normalize::l2_normalize_in_place;

/// How token vectors are reduced into the document vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    Sum,
    #[default]
    Mean,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Aggregation::Sum),
            "mean" => Ok(Aggregation::Mean),
            other => Err(PipelineError::InvalidConfig(format!(
                "aggregation {other:?} is not implemented; available are \"sum\" and \"mean\""
            ))),
        }
    }
}

/// Token and document embedding from a word-vector lookup.
#[derive(Clone)]
pub struct WordEmbeddings {
    vectors: Arc<dyn WordVectors>,
    aggregation: Aggregation,
    normalize: bool,
}

impl WordEmbeddings {
    /// Builds the step from an aggregation name, `"sum"` or `"mean"`.
    pub fn new(vectors: Arc<dyn WordVectors>, aggregation: &str) -> Result<Self, PipelineError> {
        Self::with_aggregation(vectors, aggregation.parse()?)
    }

    pub fn with_aggregation(
        vectors: Arc<dyn WordVectors>,
        aggregation: Aggregation,
    ) -> Result<Self, PipelineError> {
        if vectors.dim() == 0 {
            return Err(PipelineError::InvalidConfig(
                "word vectors report dimension 0".into(),
            ));
        }
        Ok(Self {
            vectors,
            aggregation,
            normalize: false,
        })
    }

    /// L2-normalize the document vector after aggregation.
    pub fn normalized(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn dim(&self) -> usize {
        self.vectors.dim()
    }

    fn lookup(&self, word: &str) -> Result<Vec<f32>, PipelineError> {
        let dim = self.vectors.dim();
        match self.vectors.vector_for(word) {
            Some(vector) if vector.len() == dim => Ok(vector),
            Some(vector) => Err(PipelineError::Backend(format!(
                "vector for {word:?} has {} values, expected {dim}",
                vector.len()
            ))),
            None => Ok(vec![0.0; dim]),
        }
    }
}

impl fmt::Debug for WordEmbeddings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordEmbeddings")
            .field("vectors", &self.vectors.id())
            .field("dim", &self.vectors.dim())
            .field("aggregation", &self.aggregation)
            .field("normalize", &self.normalize)
            .finish()
    }
}

impl Transformer for WordEmbeddings {
    fn category(&self) -> Category {
        Category::Embeddings
    }

    fn name(&self) -> &'static str {
        "WordEmbeddings"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vectors", quoted(self.vectors.id())),
            ("dim", self.vectors.dim().to_string()),
            ("aggregation", quoted(self.aggregation.as_str())),
            ("normalize", self.normalize.to_string()),
        ]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        let dim = self.vectors.dim();
        let tokens = doc.tokens_mut().ok_or_else(|| PipelineError::Sequencing {
            step: self.describe(),
            precondition: Precondition::EmbedOnce,
        })?;

        // Resolve every lookup before touching tokens so a backend failure
        // leaves the document as it was.
        let token_vectors = tokens
            .iter()
            .map(|token| self.lookup(token.text()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc_vector = vec![0.0f32; dim];
        for vector in &token_vectors {
            for (acc, x) in doc_vector.iter_mut().zip(vector) {
                *acc += x;
            }
        }
        let count = token_vectors.len();
        if self.aggregation == Aggregation::Mean && count > 0 {
            let inv = (count as f32).recip();
            doc_vector.iter_mut().for_each(|x| *x *= inv);
        }
        if self.normalize {
            l2_normalize_in_place(&mut doc_vector);
        }

        for (token, vector) in tokens.iter_mut().zip(token_vectors) {
            token.embedded = Some(vector);
        }
        doc.set_embedded(doc_vector);
        Ok(())
    }
}
