use std::sync::Arc;

use textprep::{
    BasicTokenizer, CaseTokens, CleanAccents, CleanEmail, CleanEol, CleanNumber,
    CleanPunctuation, CleanUrl, CleanWhitespace, Compose, Document, HashedVectors, KeyedVectors,
    RemovePunctuationTokens, RemoveStopWords, SplitPhrases, Tokens, Transformer, WordEmbeddings,
    WordTokenizer,
};

fn toy_vectors() -> Arc<KeyedVectors> {
    let mut vectors = KeyedVectors::new(3).unwrap();
    vectors.insert("quick", vec![1.0, 0.0, 0.0]).unwrap();
    vectors.insert("fox", vec![0.0, 1.0, 0.0]).unwrap();
    vectors.insert("dog", vec![0.0, 0.0, 1.0]).unwrap();
    Arc::new(vectors)
}

#[test]
fn cleaner_scenarios() {
    let cases: Vec<(Box<dyn Transformer>, &str, &str)> = vec![
        (Box::new(CleanUrl::new()), "URL: www.web.com", "URL: "),
        (Box::new(CleanEmail::new()), "Email: test@test.com", "Email: "),
        (
            Box::new(CleanPunctuation::new()),
            "Document without punctuation!",
            "Document without punctuation",
        ),
        (
            Box::new(CleanAccents::new("unicode").unwrap()),
            "àáâãäåçèéêë",
            "aaaaaaceeee",
        ),
        (
            Box::new(CleanAccents::new("ascii").unwrap()),
            "àáâãäåçèéêë",
            "aaaaaaceeee",
        ),
    ];

    for (step, input, expected) in cases {
        let mut doc = Document::new(input);
        step.transform_in_place(&mut doc).unwrap();
        assert_eq!(doc.cleaned, expected, "{}", step.describe());
        assert_eq!(doc.original(), input);
        assert!(doc.tokens().is_none());
        assert_eq!(doc.steps(), [step.describe()]);
    }
}

#[test]
fn baseline_tokenizer_keeps_symbols() {
    let doc = BasicTokenizer::new()
        .transform(r##"numbers 123 and symbols "#$%"##)
        .unwrap();
    assert_eq!(
        doc.tokens().unwrap().texts(),
        vec!["numbers", "123", "and", "symbols", "\"#$%"]
    );
}

#[test]
fn end_to_end_with_keyed_vectors() {
    let pipeline = Compose::new()
        .with(CleanUrl::new())
        .with(CleanNumber::new())
        .with(CleanPunctuation::new())
        .with(WordTokenizer::new())
        .with(CaseTokens::default())
        .with(RemoveStopWords::english())
        .with(WordEmbeddings::new(toy_vectors(), "sum").unwrap());

    let doc = pipeline
        .run("The QUICK fox, 2 dogs and one DOG: http://fox.example")
        .unwrap();

    assert_eq!(
        doc.tokens().unwrap().texts(),
        vec!["", "quick", "fox", "dogs", "", "one", "dog"]
    );
    assert_eq!(doc.embedded(), Some(&[1.0, 1.0, 1.0][..]));
    for token in doc.tokens().unwrap().iter() {
        assert_eq!(token.embedded.as_ref().map(Vec::len), Some(3));
    }
    assert_eq!(doc.steps().len(), pipeline.len());
}

#[test]
fn phrases_survive_tokenization() {
    let pipeline = Compose::new()
        .with(CleanEol::new())
        .with(CleanWhitespace::new())
        .with(SplitPhrases::new())
        .with(BasicTokenizer::new())
        .with(RemovePunctuationTokens::new());

    let doc = pipeline.run("First one.\nSecond  one!").unwrap();
    assert_eq!(
        doc.phrases.as_deref(),
        Some(&["First one.".to_string(), "Second one!".to_string()][..])
    );
    match doc.tokens().unwrap() {
        Tokens::Phrased(phrases) => {
            let texts: Vec<Vec<&str>> = phrases
                .iter()
                .map(|phrase| phrase.iter().map(|t| t.text()).collect())
                .collect();
            assert_eq!(texts, vec![vec!["First", "one"], vec!["Second", "one"]]);
        }
        Tokens::Flat(_) => panic!("expected phrase-grouped tokens"),
    }
}

#[test]
fn shared_pipeline_across_threads() {
    let vectors = Arc::new(HashedVectors::new(8, false).unwrap());
    let pipeline = Arc::new(
        Compose::new()
            .with(BasicTokenizer::new())
            .with(CaseTokens::default())
            .with(WordEmbeddings::new(vectors, "mean").unwrap()),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.run(format!("Doc number {i}")).unwrap())
        })
        .collect();

    let reference = pipeline.run("Doc number 0").unwrap();
    let docs: Vec<Document> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(docs[0], reference);
    for doc in &docs {
        assert_eq!(doc.embedded().unwrap().len(), 8);
        assert_eq!(doc.steps().len(), 3);
    }
}
