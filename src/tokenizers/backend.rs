use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::document::Document;
use crate::error::PipelineError;
use crate::token::Token;
use crate::transformer::{quoted, Category, Transformer};

use super::tokenize_document;

/// One token as reported by an external tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawToken {
    pub text: String,
    pub lemma: Option<String>,
    pub ner: Option<String>,
}

impl RawToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// External tokenizer or NLP pipeline capability.
pub trait TokenizerBackend: Send + Sync {
    /// Short identifier shown in step descriptions.
    fn id(&self) -> &str;

    fn tokenize(&self, text: &str) -> Result<Vec<RawToken>, PipelineError>;
}

/// Sub-processor of an external pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Processor {
    Tokenize,
    Lemma,
    Ner,
}

impl Processor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Processor::Tokenize => "tokenize",
            Processor::Lemma => "lemma",
            Processor::Ner => "ner",
        }
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Processor {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokenize" => Ok(Processor::Tokenize),
            "lemma" => Ok(Processor::Lemma),
            "ner" => Ok(Processor::Ner),
            other => Err(PipelineError::InvalidConfig(format!(
                "unknown processor {other:?}; expected one of \"tokenize\", \"lemma\", \"ner\""
            ))),
        }
    }
}

/// Tokenizer step backed by a [`TokenizerBackend`].
///
/// Lemma and NER tags reported by the backend are copied onto tokens only
/// when the matching processor is active.
#[derive(Clone)]
pub struct BackendTokenizer {
    backend: Arc<dyn TokenizerBackend>,
    lang: String,
    processors: Vec<Processor>,
}

impl BackendTokenizer {
    /// Validates the language tag and processor names up front.
    ///
    /// `processors` must name `tokenize`; duplicates are ignored.
    pub fn new(
        backend: Arc<dyn TokenizerBackend>,
        lang: &str,
        processors: &[&str],
    ) -> Result<Self, PipelineError> {
        if lang.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "language tag must not be empty".into(),
            ));
        }
        let mut parsed: Vec<Processor> = Vec::with_capacity(processors.len());
        for name in processors {
            let processor = name.parse::<Processor>()?;
            if !parsed.contains(&processor) {
                parsed.push(processor);
            }
        }
        if !parsed.contains(&Processor::Tokenize) {
            return Err(PipelineError::InvalidConfig(
                "processors must include \"tokenize\"".into(),
            ));
        }
        Ok(Self {
            backend,
            lang: lang.to_string(),
            processors: parsed,
        })
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    fn wants(&self, processor: Processor) -> bool {
        self.processors.contains(&processor)
    }

    fn to_token(&self, raw: RawToken) -> Token {
        let mut token = Token::new(raw.text);
        if self.wants(Processor::Lemma) {
            token.lemma = raw.lemma;
        }
        if self.wants(Processor::Ner) {
            token.ner = raw.ner;
        }
        token
    }
}

impl fmt::Debug for BackendTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendTokenizer")
            .field("backend", &self.backend.id())
            .field("lang", &self.lang)
            .field("processors", &self.processors)
            .finish()
    }
}

impl Transformer for BackendTokenizer {
    fn category(&self) -> Category {
        Category::Tokenizers
    }

    fn name(&self) -> &'static str {
        "BackendTokenizer"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let processors = self
            .processors
            .iter()
            .map(Processor::as_str)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("backend", quoted(self.backend.id())),
            ("lang", quoted(&self.lang)),
            ("processors", quoted(&processors)),
        ]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        tokenize_document(doc, |text| {
            let raw = self.backend.tokenize(text)?;
            Ok(raw.into_iter().map(|raw| self.to_token(raw)).collect())
        })
    }
}
