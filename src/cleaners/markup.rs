use std::str::FromStr;

use crate::document::Document;
use crate::error::PipelineError;
use crate::transformer::{quoted, Category, Transformer};

use super::rewrite_text;

/// How the markup is handed to the HTML parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupParser {
    /// Parse as a full document (implied `<html>`, `<head>`, `<body>`).
    #[default]
    Html,
    /// Parse as a body fragment.
    Fragment,
}

impl MarkupParser {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupParser::Html => "html",
            MarkupParser::Fragment => "fragment",
        }
    }
}

impl FromStr for MarkupParser {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(MarkupParser::Html),
            "fragment" => Ok(MarkupParser::Fragment),
            other => Err(PipelineError::InvalidConfig(format!(
                "markup parser {other:?} is not supported; use \"html\" or \"fragment\""
            ))),
        }
    }
}

/// Replaces HTML/XML markup with its visible text, text nodes joined by a
/// single space.
///
/// Needs the `markup` feature; without it construction fails.
#[derive(Debug, Clone, Copy)]
pub struct CleanMarkup {
    parser: MarkupParser,
}

impl CleanMarkup {
    /// Builds the cleaner from a parser name, `"html"` or `"fragment"`.
    pub fn new(parser: &str) -> Result<Self, PipelineError> {
        Self::with_parser(parser.parse()?)
    }

    #[cfg(feature = "markup")]
    pub fn with_parser(parser: MarkupParser) -> Result<Self, PipelineError> {
        Ok(Self { parser })
    }

    #[cfg(not(feature = "markup"))]
    pub fn with_parser(_parser: MarkupParser) -> Result<Self, PipelineError> {
        tracing::error!("markup cleaning requested but textprep was built without `markup`");
        Err(PipelineError::MissingDependency {
            capability: "markup",
            hint: "rebuild textprep with the `markup` cargo feature enabled",
        })
    }

    pub fn parser(&self) -> MarkupParser {
        self.parser
    }
}

impl Transformer for CleanMarkup {
    fn category(&self) -> Category {
        Category::Cleaners
    }

    fn name(&self) -> &'static str {
        "CleanMarkup"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("parser", quoted(self.parser.as_str()))]
    }

    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError> {
        rewrite_text(doc, |text| {
            *text = extract_text(text, self.parser)?;
            Ok(())
        })
    }
}

#[cfg(feature = "markup")]
fn extract_text(markup: &str, parser: MarkupParser) -> Result<String, PipelineError> {
    let html = match parser {
        MarkupParser::Html => scraper::Html::parse_document(markup),
        MarkupParser::Fragment => scraper::Html::parse_fragment(markup),
    };
    Ok(html.root_element().text().collect::<Vec<_>>().join(" "))
}

#[cfg(not(feature = "markup"))]
fn extract_text(_markup: &str, _parser: MarkupParser) -> Result<String, PipelineError> {
    Err(PipelineError::MissingDependency {
        capability: "markup",
        hint: "rebuild textprep with the `markup` cargo feature enabled",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_parser_rejected() {
        let err = CleanMarkup::new("lxml").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[cfg(feature = "markup")]
    #[test]
    fn extracts_visible_text() {
        let cleaner = CleanMarkup::new("html").unwrap();
        let cases = [
            ("<html><title>TEST</title>", "TEST"),
            ("<p class=\"title\"><b>test 12 test</b></p>", "test 12 test"),
            (
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?><note><body>test123test</body></note>",
                "test123test",
            ),
            ("<p>one</p><p>two</p>", "one two"),
        ];
        for (input, expected) in cases {
            let out = cleaner.transform(input).unwrap();
            assert_eq!(out.cleaned, expected, "input {input:?}");
            assert_eq!(out.original(), input);
        }
        assert_eq!(cleaner.describe(), "CleanMarkup(parser=\"html\")");
    }

    #[cfg(feature = "markup")]
    #[test]
    fn fragment_parser_keeps_text() {
        let cleaner = CleanMarkup::new("fragment").unwrap();
        let out = cleaner.transform("<em>hi</em> there").unwrap();
        assert_eq!(out.cleaned, "hi  there");
    }

    #[cfg(not(feature = "markup"))]
    #[test]
    fn construction_fails_without_parser() {
        let err = CleanMarkup::new("html").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingDependency { capability: "markup", .. }
        ));
    }
}
