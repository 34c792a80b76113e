//! Serializable pipeline configuration.
//!
//! [`PipelineConfig`] describes a pipeline as data so it can live in a JSON
//! file next to the model assets. [`PipelineConfig::build`] validates it and
//! constructs a [`Compose`]; every step constructor runs at that point, so
//! bad mode names, unknown processors and missing optional dependencies are
//! reported before any document is processed.
//!
//! # Validation
//!
//! Besides `version >= 1` and a non-empty step list, `validate` replays the
//! category preconditions over the configured order. A cleaner placed after
//! the tokenizer, or a normalizer after the embedder, is rejected here rather
//! than on the first document.
//!
//! # Example
//!
//! ```rust
//! use textprep::PipelineConfig;
//!
//! let json = r#"{
//!   "version": 1,
//!   "steps": [
//!     { "type": "clean_url" },
//!     { "type": "clean_accents", "mode": "ascii" },
//!     { "type": "basic_tokenizer" },
//!     { "type": "case_tokens" },
//!     { "type": "word_embeddings",
//!       "vectors": { "kind": "hashed", "dim": 8 },
//!       "aggregation": "mean" }
//!   ]
//! }"#;
//!
//! let pipeline = PipelineConfig::from_json_str(json).unwrap().build().unwrap();
//! let doc = pipeline.run("Café www.example.com").unwrap();
//! assert_eq!(doc.embedded().unwrap().len(), 8);
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cleaners::{
    CleanAccents, CleanEmail, CleanEol, CleanMarkup, CleanNumber, CleanPunctuation, CleanUrl,
    CleanWhitespace, SplitPhrases,
};
use crate::compose::Compose;
use crate::document::DocumentState;
use crate::embeddings::{HashedVectors, KeyedVectors, WordEmbeddings, WordVectors};
use crate::error::PipelineError;
use crate::normalizers::{CaseTokens, RemovePunctuationTokens, RemoveStopWords};
use crate::tokenizers::{BackendTokenizer, BasicTokenizer, HfTokenizer, WordTokenizer};
use crate::transformer::{Category, Transformer};
use crate::validation;

/// A pipeline described as data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Configuration format version. Must be >= 1.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Steps in application order.
    pub steps: Vec<StepConfig>,
}

impl Default for PipelineConfig {
    /// Whitespace tokenization followed by lowercasing.
    fn default() -> Self {
        Self {
            version: 1,
            steps: vec![StepConfig::BasicTokenizer, StepConfig::CaseTokens {
                mode: default_case_mode(),
            }],
        }
    }
}

/// One configured step. Serialized with a `type` tag, e.g.
/// `{ "type": "clean_accents", "mode": "unicode" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepConfig {
    CleanUrl,
    CleanEmail,
    CleanNumber,
    CleanPunctuation,
    CleanEol,
    CleanWhitespace,
    SplitPhrases,
    CleanMarkup {
        #[serde(default = "default_markup_parser")]
        parser: String,
    },
    CleanAccents {
        #[serde(default = "default_accent_mode")]
        mode: String,
    },
    BasicTokenizer,
    WordTokenizer,
    HfTokenizer {
        path: PathBuf,
        #[serde(default = "default_lang")]
        lang: String,
        #[serde(default = "default_processors")]
        processors: Vec<String>,
    },
    CaseTokens {
        #[serde(default = "default_case_mode")]
        mode: String,
    },
    RemovePunctuationTokens,
    RemoveStopWords {
        /// `None` selects the built-in English list.
        #[serde(default)]
        words: Option<Vec<String>>,
        #[serde(default)]
        case_sensitive: bool,
    },
    WordEmbeddings {
        vectors: VectorsConfig,
        #[serde(default = "default_aggregation")]
        aggregation: String,
        #[serde(default)]
        normalize: bool,
    },
}

/// Source of word vectors for an embedding step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorsConfig {
    /// Deterministic hash-derived vectors.
    Hashed {
        dim: usize,
        #[serde(default)]
        normalize: bool,
    },
    /// word2vec/GloVe text file.
    File { path: PathBuf },
}

fn default_version() -> u32 {
    1
}

fn default_markup_parser() -> String {
    "html".into()
}

fn default_accent_mode() -> String {
    "unicode".into()
}

fn default_lang() -> String {
    "en".into()
}

fn default_processors() -> Vec<String> {
    vec!["tokenize".into()]
}

fn default_case_mode() -> String {
    "lower".into()
}

fn default_aggregation() -> String {
    "mean".into()
}

impl StepConfig {
    /// Config tag of this step, as written in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            StepConfig::CleanUrl => "clean_url",
            StepConfig::CleanEmail => "clean_email",
            StepConfig::CleanNumber => "clean_number",
            StepConfig::CleanPunctuation => "clean_punctuation",
            StepConfig::CleanEol => "clean_eol",
            StepConfig::CleanWhitespace => "clean_whitespace",
            StepConfig::SplitPhrases => "split_phrases",
            StepConfig::CleanMarkup { .. } => "clean_markup",
            StepConfig::CleanAccents { .. } => "clean_accents",
            StepConfig::BasicTokenizer => "basic_tokenizer",
            StepConfig::WordTokenizer => "word_tokenizer",
            StepConfig::HfTokenizer { .. } => "hf_tokenizer",
            StepConfig::CaseTokens { .. } => "case_tokens",
            StepConfig::RemovePunctuationTokens => "remove_punctuation_tokens",
            StepConfig::RemoveStopWords { .. } => "remove_stop_words",
            StepConfig::WordEmbeddings { .. } => "word_embeddings",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            StepConfig::CleanUrl
            | StepConfig::CleanEmail
            | StepConfig::CleanNumber
            | StepConfig::CleanPunctuation
            | StepConfig::CleanEol
            | StepConfig::CleanWhitespace
            | StepConfig::SplitPhrases
            | StepConfig::CleanMarkup { .. }
            | StepConfig::CleanAccents { .. } => Category::Cleaners,
            StepConfig::BasicTokenizer
            | StepConfig::WordTokenizer
            | StepConfig::HfTokenizer { .. } => Category::Tokenizers,
            StepConfig::CaseTokens { .. }
            | StepConfig::RemovePunctuationTokens
            | StepConfig::RemoveStopWords { .. } => Category::Normalizers,
            StepConfig::WordEmbeddings { .. } => Category::Embeddings,
        }
    }

    /// Constructs the configured step.
    pub fn build(&self) -> Result<Box<dyn Transformer>, PipelineError> {
        let step: Box<dyn Transformer> = match self {
            StepConfig::CleanUrl => Box::new(CleanUrl::new()),
            StepConfig::CleanEmail => Box::new(CleanEmail::new()),
            StepConfig::CleanNumber => Box::new(CleanNumber::new()),
            StepConfig::CleanPunctuation => Box::new(CleanPunctuation::new()),
            StepConfig::CleanEol => Box::new(CleanEol::new()),
            StepConfig::CleanWhitespace => Box::new(CleanWhitespace::new()),
            StepConfig::SplitPhrases => Box::new(SplitPhrases::new()),
            StepConfig::CleanMarkup { parser } => Box::new(CleanMarkup::new(parser)?),
            StepConfig::CleanAccents { mode } => Box::new(CleanAccents::new(mode)?),
            StepConfig::BasicTokenizer => Box::new(BasicTokenizer::new()),
            StepConfig::WordTokenizer => Box::new(WordTokenizer::new()),
            StepConfig::HfTokenizer {
                path,
                lang,
                processors,
            } => {
                let backend = Arc::new(HfTokenizer::from_file(path)?);
                let processors: Vec<&str> = processors.iter().map(String::as_str).collect();
                Box::new(BackendTokenizer::new(backend, lang, &processors)?)
            }
            StepConfig::CaseTokens { mode } => Box::new(CaseTokens::new(mode)?),
            StepConfig::RemovePunctuationTokens => Box::new(RemovePunctuationTokens::new()),
            StepConfig::RemoveStopWords {
                words,
                case_sensitive,
            } => match words {
                Some(words) => Box::new(RemoveStopWords::new(words.iter().cloned(), *case_sensitive)?),
                None => Box::new(RemoveStopWords::english()),
            },
            StepConfig::WordEmbeddings {
                vectors,
                aggregation,
                normalize,
            } => Box::new(
                WordEmbeddings::new(vectors.load()?, aggregation)?.normalized(*normalize),
            ),
        };
        Ok(step)
    }
}

impl VectorsConfig {
    pub fn load(&self) -> Result<Arc<dyn WordVectors>, PipelineError> {
        match self {
            VectorsConfig::Hashed { dim, normalize } => {
                Ok(Arc::new(HashedVectors::new(*dim, *normalize)?))
            }
            VectorsConfig::File { path } => Ok(Arc::new(KeyedVectors::from_path(path)?)),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json)
            .map_err(|err| PipelineError::InvalidConfig(format!("malformed pipeline config: {err}")))
    }

    pub fn to_json_string(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(self).map_err(|err| PipelineError::InvalidConfig(err.to_string()))
    }

    /// Checks version, emptiness and step order without constructing steps.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.version == 0 {
            return Err(PipelineError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.steps.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "pipeline needs at least one step".into(),
            ));
        }

        let mut state = DocumentState::default();
        for (index, step) in self.steps.iter().enumerate() {
            let category = step.category();
            validation::check(category, state).map_err(|precondition| {
                PipelineError::InvalidConfig(format!(
                    "step {index} ({}): {precondition}",
                    step.kind()
                ))
            })?;
            match category {
                Category::Tokenizers => state.tokenized = true,
                Category::Embeddings => state.embedded = true,
                Category::Cleaners | Category::Normalizers => {}
            }
        }
        Ok(())
    }

    /// Validates, then constructs every step.
    pub fn build(&self) -> Result<Compose, PipelineError> {
        self.validate()?;
        let steps = self
            .steps
            .iter()
            .map(StepConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Compose::from_steps(steps))
    }
}
