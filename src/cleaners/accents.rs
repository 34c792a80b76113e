use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::document::Document;
use crate::error::PipelineError;
use crate::transformer::{quoted, Category, Transformer};

use super::rewrite_text;

/// Accent stripping algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccentMode {
    /// NFKD, then drop combining marks. Keeps letters that have no ASCII
    /// transliteration.
    #[default]
    Unicode,
    /// NFKD, then drop everything outside 7-bit ASCII. Lossier: characters
    /// without a direct ASCII form vanish.
    Ascii,
}

impl AccentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccentMode::Unicode => "unicode",
            AccentMode::Ascii => "ascii",
        }
    }
}

impl fmt::Display for AccentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccentMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicode" => Ok(AccentMode::Unicode),
            "ascii" => Ok(AccentMode::Ascii),
            other => Err(PipelineError::InvalidConfig(format!(
                "accent mode {other:?} is not implemented; available modes are \"unicode\" and \"ascii\""
            ))),
        }
    }
}

/// Strips accents from `cleaned`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanAccents {
    mode: AccentMode,
}

impl CleanAccents {
    /// Builds the cleaner from a mode name, `"unicode"` or `"ascii"`.
    pub fn new(mode: &str) -> Result<Self, PipelineError> {
        Ok(Self::with_mode(mode.parse()?))
    }

    pub fn with_mode(mode: AccentMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AccentMode {
        self.mode
    }
}

impl Transformer for CleanAccents {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanAccents"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("mode", quoted(self.mode.as_str()))]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        let strip: fn(&str) -> String = match self.mode {
            AccentMode::Unicode => strip_accents_unicode,
            AccentMode::Ascii => strip_accents_ascii,
        };
        rewrite_text(doc, |text| {
            *text = strip(text.as_str());
            Ok(())
        })
    }
}

/// Compatibility-decomposes `text` and drops combining marks. ASCII input is
/// returned as is.
pub fn strip_accents_unicode(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    text.nfkd()
        .filter(|&c| canonical_combining_class(c) == 0)
        .collect()
}

/// Compatibility-decomposes `text` and keeps only ASCII characters.
pub fn strip_accents_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(mode: &str, input: &str) -> String {
        CleanAccents::new(mode)
            .expect("valid mode")
            .transform(input)
            .expect("cleaner succeeds")
            .cleaned
    }

    #[test]
    fn strips_latin_accents_in_both_modes() {
        for mode in ["unicode", "ascii"] {
            assert_eq!(strip(mode, "àáâãäåçèéêë"), "aaaaaaceeee");
            assert_eq!(strip(mode, "ìíîïñòóôõöùúûüý"), "iiiinooooouuuuy");
            assert_eq!(strip(mode, "this is à test"), "this is a test");
            assert_eq!(strip(mode, "o\u{0308}"), "o");
            assert_eq!(strip(mode, "o\u{0308}\u{0304}"), "o");
            assert_eq!(strip(mode, "\u{0300}\u{0301}\u{0302}\u{0303}"), "");
        }
    }

    #[test]
    fn modes_differ_without_ascii_transliteration() {
        assert_eq!(strip("unicode", "\u{0625}"), "\u{0627}");
        assert_eq!(strip("ascii", "\u{0625}"), "");
    }

    #[test]
    fn ascii_fast_path_is_unchanged() {
        assert_eq!(strip_accents_unicode("this is a test"), "this is a test");
    }

    #[test]
    fn stripping_is_idempotent() {
        let inputs = ["àáâãäåçèéêë", "Ḱoln ﬁ \u{0625}", "naïve café", "plain"];
        for input in inputs {
            let once = strip_accents_unicode(input);
            assert_eq!(strip_accents_unicode(&once), once);
            let once = strip_accents_ascii(input);
            assert_eq!(strip_accents_ascii(&once), once);
        }
    }

    #[test]
    fn invalid_mode_rejected() {
        let err = CleanAccents::new("random").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn describe_includes_mode() {
        let cleaner = CleanAccents::new("ascii").unwrap();
        assert_eq!(cleaner.describe(), "CleanAccents(mode=\"ascii\")");
        assert_eq!(CleanAccents::default().mode(), AccentMode::Unicode);
    }
}
