//! Normalizers: rewrite each token's `normalized` form in place.
//!
//! Every normalizer reads [`Token::text`] (the form left by earlier
//! normalizers) and needs a tokenized, not yet embedded document.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::document::Document;
use crate::error::PipelineError;
use crate::token::Token;
use crate::transformer::{quoted, Category, Transformer};

/// Applies `f` to every token's current form. Missing tokens cannot happen
/// here since the precondition already ran.
fn normalize_tokens<F>(doc: &mut Document, mut f: F)
where
    F: FnMut(&Token) -> String,
{
    if let Some(tokens) = doc.tokens_mut() {
        for token in tokens.iter_mut() {
            let normalized = f(token);
            token.normalized = Some(normalized);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Lower,
    Upper,
}

impl CaseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Lower => "lower",
            CaseMode::Upper => "upper",
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(CaseMode::Lower),
            "upper" => Ok(CaseMode::Upper),
            other => Err(PipelineError::InvalidConfig(format!(
                "case mode {other:?} is not implemented; available modes are \"lower\" and \"upper\""
            ))),
        }
    }
}

/// Case-folds tokens (Unicode, locale-free).
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseTokens {
    mode: CaseMode,
}

impl CaseTokens {
    pub fn new(mode: &str) -> Result<Self, PipelineError> {
        Ok(Self::with_mode(mode.parse()?))
    }

    pub fn with_mode(mode: CaseMode) -> Self {
        Self { mode }
    }
}

impl Transformer for CaseTokens {
    fn category(&self) -> Category {
        Category::Normalizers
    }

    fn name(&self) -> &'static str {
        "CaseTokens"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("mode", quoted(self.mode.as_str()))]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        let mode = self.mode;
        normalize_tokens(doc, |token| match mode {
            CaseMode::Lower => token.text().to_lowercase(),
            CaseMode::Upper => token.text().to_uppercase(),
        });
        Ok(())
    }
}

/// Strips ASCII punctuation from every token; pure-punctuation tokens end up
/// empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovePunctuationTokens;

impl RemovePunctuationTokens {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for RemovePunctuationTokens {
    fn category(&self) -> Category {
        Category::Normalizers
    }

    fn name(&self) -> &'static str {
        "RemovePunctuationTokens"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        normalize_tokens(doc, |token| {
            token
                .text()
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect()
        });
        Ok(())
    }
}

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// Blanks out stop words: their `normalized` becomes the empty string so
/// token positions are kept.
#[derive(Debug, Clone)]
pub struct RemoveStopWords {
    words: HashSet<String>,
    case_sensitive: bool,
    label: &'static str,
}

impl RemoveStopWords {
    /// Uses a caller-supplied list. Fails on an empty list.
    pub fn new<I, S>(words: I, case_sensitive: bool) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|word| {
                let word: String = word.into();
                if case_sensitive {
                    word
                } else {
                    word.to_lowercase()
                }
            })
            .collect();
        if words.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "stop word list must not be empty".into(),
            ));
        }
        Ok(Self {
            words,
            case_sensitive,
            label: "custom",
        })
    }

    /// Built-in English list, case-insensitive.
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            case_sensitive: false,
            label: "english",
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.words.contains(word)
        } else {
            self.words.contains(&word.to_lowercase())
        }
    }
}

impl Transformer for RemoveStopWords {
    fn category(&self) -> Category {
        Category::Normalizers
    }

    fn name(&self) -> &'static str {
        "RemoveStopWords"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("words", quoted(self.label)),
            ("case_sensitive", self.case_sensitive.to_string()),
        ]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        normalize_tokens(doc, |token| {
            if self.is_stop_word(token.text()) {
                String::new()
            } else {
                token.text().to_string()
            }
        });
        Ok(())
    }
}
