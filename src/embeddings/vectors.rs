//! Word-vector lookup capabilities.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::hash64;
use tracing::info;

use crate::error::PipelineError;

use super::normalize::l2_normalize_in_place;

/// Maps a token string to a fixed-length vector.
pub trait WordVectors: Send + Sync {
    /// Short identifier shown in step descriptions.
    fn id(&self) -> &str;

    /// Length of every vector this lookup returns.
    fn dim(&self) -> usize;

    /// `None` when the word is unknown.
    fn vector_for(&self, word: &str) -> Option<Vec<f32>>;
}

/// In-memory vectors, usually loaded from a word2vec/GloVe text file.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedVectors {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl KeyedVectors {
    pub fn new(dim: usize) -> Result<Self, PipelineError> {
        if dim == 0 {
            return Err(PipelineError::InvalidConfig(
                "vector dimension must be >= 1".into(),
            ));
        }
        Ok(Self {
            dim,
            vectors: HashMap::new(),
        })
    }

    /// Adds or replaces a word's vector. The vector length must match `dim`.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f32>) -> Result<(), PipelineError> {
        if vector.len() != self.dim {
            return Err(PipelineError::InvalidConfig(format!(
                "vector has {} values, expected {}",
                vector.len(),
                self.dim
            )));
        }
        self.vectors.insert(word.into(), vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Parses the text format: one `word v1 v2 ...` entry per line, with an
    /// optional word2vec `count dim` header line. Blank lines are skipped.
    ///
    /// A first line of two integers is ambiguous: it may be a header or a
    /// numeric word with a one-value vector. It is read as a header only when
    /// the next row is not one value wide, or when `dim` is 1.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, PipelineError> {
        let mut dim: Option<usize> = None;
        let mut vectors = HashMap::new();
        // (word, value, dim) of a first line that may still be a data row.
        let mut pending_header: Option<(String, f32, usize)> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|err| PipelineError::VectorLoad(format!("line {line_no}: {err}")))?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();

            if line_no == 1 && values.len() == 1 {
                if let (Ok(_count), Ok(header_dim)) =
                    (word.parse::<usize>(), values[0].parse::<usize>())
                {
                    pending_header = Some((word.to_string(), header_dim as f32, header_dim));
                    continue;
                }
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|err| PipelineError::VectorLoad(format!("line {line_no}: {err}")))?;

            if let Some((first_word, first_value, header_dim)) = pending_header.take() {
                if vector.len() == 1 && header_dim != 1 {
                    dim = Some(1);
                    vectors.insert(first_word, vec![first_value]);
                } else {
                    dim = Some(header_dim);
                }
            }

            let expected = *dim.get_or_insert(vector.len());
            if expected == 0 || vector.len() != expected {
                return Err(PipelineError::VectorLoad(format!(
                    "line {line_no}: expected {expected} values, found {}",
                    vector.len()
                )));
            }
            vectors.insert(word.to_string(), vector);
        }

        if let Some((first_word, first_value, _)) = pending_header {
            dim = Some(1);
            vectors.insert(first_word, vec![first_value]);
        }

        match dim {
            Some(dim) if !vectors.is_empty() => Ok(Self { dim, vectors }),
            _ => Err(PipelineError::VectorLoad("no vectors found".into())),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            PipelineError::VectorLoad(format!("cannot open {}: {err}", path.display()))
        })?;
        let vectors = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            words = vectors.len(),
            dim = vectors.dim,
            "word_vectors_loaded"
        );
        Ok(vectors)
    }
}

impl WordVectors for KeyedVectors {
    fn id(&self) -> &str {
        "keyed"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn vector_for(&self, word: &str) -> Option<Vec<f32>> {
        self.vectors.get(word).cloned()
    }
}

/// Deterministic vectors derived from a hash of the word. Every word hits,
/// no model files needed; meant for tests and offline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedVectors {
    dim: usize,
    normalize: bool,
}

impl HashedVectors {
    pub fn new(dim: usize, normalize: bool) -> Result<Self, PipelineError> {
        if dim == 0 {
            return Err(PipelineError::InvalidConfig(
                "vector dimension must be >= 1".into(),
            ));
        }
        Ok(Self { dim, normalize })
    }
}

impl WordVectors for HashedVectors {
    fn id(&self) -> &str {
        "hashed"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn vector_for(&self, word: &str) -> Option<Vec<f32>> {
        let h = hash64(word.as_bytes());
        let mut v: Vec<f32> = (0..self.dim)
            .map(|idx| ((h >> (idx % 32)) as f32 * 0.0001).sin())
            .collect();
        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        Some(v)
    }
}
