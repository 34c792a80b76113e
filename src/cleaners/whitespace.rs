//! Whitespace normalization.
//!
//! Whitespace is Unicode whitespace: ASCII space, tab, newline, carriage
//! return, no-break space and the rest of the `White_Space` property.
//!
//! ```rust
//! use textprep::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
//! ```

use crate::document::Document;
use crate::error::PipelineError;
use crate::transformer::{Category, Transformer};

use super::rewrite_text;

/// Collapses whitespace runs to one ASCII space and trims both ends.
///
/// Returns an empty string for empty or whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Cleaner form of [`collapse_whitespace`]. Usually runs last among the
/// cleaners, after removals have left gaps behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanWhitespace;

impl CleanWhitespace {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CleanWhitespace {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanWhitespace"
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            *text = collapse_whitespace(text);
            Ok(())
        })
    }
}
