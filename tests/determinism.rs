use std::sync::Arc;

use textprep::{
    strip_accents_ascii, strip_accents_unicode, BasicTokenizer, CaseTokens, CleanAccents,
    CleanEmail, CleanEol, CleanMarkup, CleanNumber, CleanPunctuation, CleanUrl, CleanWhitespace,
    Document, HashedVectors, SplitPhrases, Transformer, WordEmbeddings, WordTokenizer,
};

const SAMPLES: &[&str] = &[
    "",
    "plain words only",
    "Ünïcödé façade, naïve café!",
    "mail a.b+c@d-e.org or visit www.x.io/path?q=1 now",
    "tabs\tand\nnewlines\r\n and   spaces",
    "数字 42 と記号 #!",
];

fn cleaners() -> Vec<Box<dyn Transformer>> {
    let mut steps: Vec<Box<dyn Transformer>> = vec![
        Box::new(CleanUrl::new()),
        Box::new(CleanEmail::new()),
        Box::new(CleanNumber::new()),
        Box::new(CleanPunctuation::new()),
        Box::new(CleanEol::new()),
        Box::new(CleanWhitespace::new()),
        Box::new(CleanAccents::new("unicode").unwrap()),
        Box::new(CleanAccents::new("ascii").unwrap()),
        Box::new(SplitPhrases::new()),
    ];
    if let Ok(markup) = CleanMarkup::new("html") {
        steps.push(Box::new(markup));
    }
    steps
}

#[test]
fn copy_mode_never_mutates_input() {
    for sample in SAMPLES {
        let input = Document::new(*sample);
        let snapshot = input.clone();

        let cleaned = CleanPunctuation::new().transform(&input).unwrap();
        let tokenized = BasicTokenizer::new().transform(&cleaned).unwrap();
        let normalized = CaseTokens::default().transform(&tokenized).unwrap();

        assert_eq!(input, snapshot);
        assert!(cleaned.tokens().is_none());
        assert!(tokenized
            .tokens()
            .unwrap()
            .iter()
            .all(|token| token.normalized.is_none()));
        assert_eq!(cleaned.steps().len(), 1);
        assert_eq!(tokenized.steps().len(), 2);
        assert_eq!(normalized.steps().len(), 3);
    }
}

#[test]
fn in_place_grows_steps_by_one() {
    for sample in SAMPLES {
        let mut doc = Document::new(*sample);
        for (expected, step) in cleaners().into_iter().enumerate() {
            assert_eq!(doc.steps().len(), expected);
            step.transform_in_place(&mut doc).unwrap();
            assert_eq!(doc.steps().last(), Some(&step.describe()));
        }
    }
}

#[test]
fn cleaners_never_tokenize_or_touch_original() {
    for sample in SAMPLES {
        for step in cleaners() {
            let mut doc = Document::new(*sample);
            step.transform_in_place(&mut doc).unwrap();
            assert_eq!(doc.original(), *sample, "{}", step.describe());
            assert!(doc.tokens().is_none(), "{}", step.describe());
            assert!(doc.embedded().is_none());
        }
    }
}

#[test]
fn accent_stripping_is_idempotent() {
    for sample in SAMPLES {
        let once = strip_accents_unicode(sample);
        assert_eq!(strip_accents_unicode(&once), once);

        let once = strip_accents_ascii(sample);
        assert_eq!(strip_accents_ascii(&once), once);
        assert!(once.is_ascii());
    }
}

#[test]
fn same_input_same_output() {
    let vectors = Arc::new(HashedVectors::new(32, true).unwrap());
    let embed = WordEmbeddings::new(vectors, "mean").unwrap();
    for sample in SAMPLES {
        let run = || {
            let doc = WordTokenizer::new().transform(*sample).unwrap();
            let doc = CaseTokens::default().transform(doc).unwrap();
            embed.transform(doc).unwrap()
        };
        assert_eq!(run(), run());
    }
}

#[test]
fn embedding_sets_every_token() {
    let vectors = Arc::new(HashedVectors::new(5, false).unwrap());
    let embed = WordEmbeddings::new(vectors, "sum").unwrap();
    for sample in SAMPLES {
        let doc = embed
            .transform(BasicTokenizer::new().transform(*sample).unwrap())
            .unwrap();
        assert_eq!(doc.embedded().map(<[f32]>::len), Some(5));
        assert!(doc
            .tokens()
            .unwrap()
            .iter()
            .all(|token| token.embedded.as_ref().map(Vec::len) == Some(5)));
    }
}
