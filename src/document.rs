//! The working value every pipeline step reads and writes.
//!
//! A [`Document`] starts from raw text. Cleaners rewrite `cleaned`,
//! tokenizers set `tokens`, normalizers and embedders enrich those tokens, and
//! the protocol layer appends one entry to `steps` per successful step.
//!
//! # Structure
//!
//! ```text
//! Document
//! ├── original: String            # source text, never modified
//! ├── cleaned: String             # starts equal to original
//! ├── phrases: Option<Vec<String>>
//! ├── tokens: Option<Tokens>      # set once by a tokenizer
//! ├── embedded: Option<Vec<f32>>  # set once by an embedder
//! └── steps: Vec<String>          # append-only audit log
//! ```
//!
//! # Examples
//!
//! ```rust
//! use textprep::{BasicTokenizer, Document, Transformer};
//!
//! let doc = Document::new("Hello world");
//! let out = BasicTokenizer::new().transform(&doc).unwrap();
//!
//! assert!(doc.tokens().is_none());
//! assert_eq!(out.tokens().unwrap().len(), 2);
//! assert_eq!(out.steps(), ["BasicTokenizer()"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::token::Tokens;

/// Raw text plus everything the pipeline has derived from it so far.
///
/// `Clone` is a full deep copy: tokens, phrases and steps are owned per
/// instance, so mutating a clone never affects the source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    original: String,
    /// Working text that cleaners rewrite.
    pub cleaned: String,
    /// Sentence-level segmentation; tokenizers keep this grouping.
    pub phrases: Option<Vec<String>>,
    tokens: Option<Tokens>,
    embedded: Option<Vec<f32>>,
    #[serde(default)]
    steps: Vec<String>,
}

/// Snapshot of the fields the category preconditions look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentState {
    pub tokenized: bool,
    pub embedded: bool,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            cleaned: original.clone(),
            original,
            phrases: None,
            tokens: None,
            embedded: None,
            steps: Vec::new(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn tokens(&self) -> Option<&Tokens> {
        self.tokens.as_ref()
    }

    pub fn tokens_mut(&mut self) -> Option<&mut Tokens> {
        self.tokens.as_mut()
    }

    /// Installs the token sequence. Tokens can be replaced but never removed.
    pub(crate) fn set_tokens(&mut self, tokens: Tokens) {
        self.tokens = Some(tokens);
    }

    pub fn embedded(&self) -> Option<&[f32]> {
        self.embedded.as_deref()
    }

    pub(crate) fn set_embedded(&mut self, vector: Vec<f32>) {
        self.embedded = Some(vector);
    }

    /// Descriptions of every step applied so far, oldest first.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub(crate) fn record_step(&mut self, description: String) {
        self.steps.push(description);
    }

    pub fn state(&self) -> DocumentState {
        DocumentState {
            tokenized: self.tokens.is_some(),
            embedded: self.embedded.is_some(),
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::new(text)
    }
}

/// Anything a transformer accepts as input.
///
/// Text is wrapped into a fresh [`Document`]. JSON input comes from loosely
/// typed sources: a JSON string is treated as text, a JSON object as a
/// serialized document, anything else is rejected.
#[derive(Debug, Clone)]
pub enum Input {
    Text(String),
    Document(Document),
    Json(serde_json::Value),
}

impl Input {
    /// Resolves the input into an owned document, failing on unsupported
    /// JSON values.
    pub fn into_document(self) -> Result<Document, PipelineError> {
        match self {
            Input::Text(text) => Ok(Document::new(text)),
            Input::Document(doc) => Ok(doc),
            Input::Json(serde_json::Value::String(text)) => Ok(Document::new(text)),
            Input::Json(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
                .map_err(|err| PipelineError::UnsupportedInput(format!("malformed document: {err}"))),
            Input::Json(other) => Err(PipelineError::UnsupportedInput(
                json_type_name(&other).to_string(),
            )),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<Document> for Input {
    fn from(doc: Document) -> Self {
        Input::Document(doc)
    }
}

impl From<&Document> for Input {
    fn from(doc: &Document) -> Self {
        Input::Document(doc.clone())
    }
}

impl From<serde_json::Value> for Input {
    fn from(value: serde_json::Value) -> Self {
        Input::Json(value)
    }
}
