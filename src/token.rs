use serde::{Deserialize, Serialize};

/// A single lexical unit with the attributes later steps derive from it.
///
/// `original` is fixed at construction; normalizers and embedders fill the
/// optional fields in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    original: String,
    /// Normalized surface form, set by normalizers.
    pub normalized: Option<String>,
    /// Lemma reported by an external tokenizer backend.
    pub lemma: Option<String>,
    /// Named-entity tag reported by an external tokenizer backend.
    pub ner: Option<String>,
    /// Word vector, set by an embedding step.
    pub embedded: Option<Vec<f32>>,
}

impl Token {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            normalized: None,
            lemma: None,
            ner: None,
            embedded: None,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current surface form: the normalized text if a normalizer ran,
    /// otherwise the original.
    pub fn text(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.original)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text()
    }
}

/// Token sequence of a document, flat or grouped one group per phrase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Tokens {
    Flat(Vec<Token>),
    Phrased(Vec<Vec<Token>>),
}

impl Tokens {
    /// Visits every token in document order, ignoring phrase grouping.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Token> + '_> {
        match self {
            Tokens::Flat(tokens) => Box::new(tokens.iter()),
            Tokens::Phrased(groups) => Box::new(groups.iter().flatten()),
        }
    }

    pub fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut Token> + '_> {
        match self {
            Tokens::Flat(tokens) => Box::new(tokens.iter_mut()),
            Tokens::Phrased(groups) => Box::new(groups.iter_mut().flatten()),
        }
    }

    /// Total number of tokens across all phrases.
    pub fn len(&self) -> usize {
        match self {
            Tokens::Flat(tokens) => tokens.len(),
            Tokens::Phrased(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_phrased(&self) -> bool {
        matches!(self, Tokens::Phrased(_))
    }

    /// Current surface forms in document order.
    pub fn texts(&self) -> Vec<&str> {
        self.iter().map(Token::text).collect()
    }
}
