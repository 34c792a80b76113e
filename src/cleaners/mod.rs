//! Cleaners: string rewrites of `Document::cleaned` that must run before
//! tokenization.
//!
//! Each cleaner is independent of the others. Order between cleaners is the
//! pipeline author's choice (URL removal before punctuation removal keeps
//! URLs intact long enough to match, for instance); only cleaner-before-
//! tokenizer ordering is enforced.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::error::PipelineError;
use crate::transformer::{Category, Transformer};

mod accents;
mod markup;
mod phrases;
mod whitespace;

pub use accents::{strip_accents_ascii, strip_accents_unicode, AccentMode, CleanAccents};
pub use markup::{CleanMarkup, MarkupParser};
pub use phrases::SplitPhrases;
pub use whitespace::{collapse_whitespace, CleanWhitespace};

static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+").expect("valid http url regex"));
static WWW_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"www\S+").expect("valid www url regex"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+").expect("valid email regex")
});
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid number regex"));

/// Applies `rewrite` to `cleaned` and, once [`SplitPhrases`] ran, to every
/// phrase, so tokenizers see the rewrite whichever text they read.
pub(crate) fn rewrite_text<F>(doc: &mut Document, mut rewrite: F) -> Result<(), PipelineError>
where
    F: FnMut(&mut String) -> Result<(), PipelineError>,
{
    rewrite(&mut doc.cleaned)?;
    if let Some(phrases) = doc.phrases.as_mut() {
        for phrase in phrases.iter_mut() {
            rewrite(phrase)?;
        }
    }
    Ok(())
}

/// Deletes every match of `re`, keeping the original allocation when nothing
/// matched.
fn remove_matches(re: &Regex, text: &mut String) {
    let replaced = match re.replace_all(text, "") {
        Cow::Borrowed(_) => None,
        Cow::Owned(replaced) => Some(replaced),
    };
    if let Some(replaced) = replaced {
        *text = replaced;
    }
}

/// Removes `http…` and `www…` runs up to the next whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanUrl;

impl CleanUrl {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanUrl {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanUrl"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            remove_matches(&HTTP_URL, text);
            remove_matches(&WWW_URL, text);
            Ok(())
        })
    }
}

/// Removes lowercase `local@domain.tld` addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanEmail;

impl CleanEmail {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanEmail {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanEmail"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            remove_matches(&EMAIL, text);
            Ok(())
        })
    }
}

/// Removes runs of ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanNumber;

impl CleanNumber {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanNumber {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanNumber"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            remove_matches(&NUMBER, text);
            Ok(())
        })
    }
}

/// Removes every ASCII punctuation character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanPunctuation;

impl CleanPunctuation {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanPunctuation {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanPunctuation"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            text.retain(|c| !c.is_ascii_punctuation());
            Ok(())
        })
    }
}

/// Replaces each newline with a single space. Runs of spaces are kept; pair
/// with [`CleanWhitespace`] to collapse them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanEol;

impl CleanEol {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanEol {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanEol"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            if text.contains('\n') {
                *text = text.replace('\n', " ");
            }
            Ok(())
        })
    }
}
