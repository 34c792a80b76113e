use std::fs;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};
use textprep::{KeyedVectors, PipelineConfig, PipelineError, StepConfig, VectorsConfig, WordVectors};

fn write_vectors(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp vectors file");
    file.write_all(contents.as_bytes()).expect("write vectors");
    file.flush().expect("flush vectors");
    file
}

#[test]
fn loads_word2vec_file_from_disk() {
    let file = write_vectors("3 2\ncat 1.0 0.0\ndog 0.0 1.0\nfish 0.5 0.5\n");
    let vectors = KeyedVectors::from_path(file.path()).unwrap();
    assert_eq!(vectors.dim(), 2);
    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors.vector_for("fish"), Some(vec![0.5, 0.5]));
}

#[test]
fn missing_vector_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    let err = KeyedVectors::from_path(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, PipelineError::VectorLoad(msg) if msg.contains("absent.txt")));
}

#[test]
fn pipeline_from_json_file_with_vector_file() {
    let vectors = write_vectors("cat 1 0\ndog 0 1\n");
    let config = PipelineConfig {
        version: 1,
        steps: vec![
            StepConfig::CleanPunctuation,
            StepConfig::BasicTokenizer,
            StepConfig::CaseTokens {
                mode: "lower".into(),
            },
            StepConfig::WordEmbeddings {
                vectors: VectorsConfig::File {
                    path: vectors.path().to_path_buf(),
                },
                aggregation: "sum".into(),
                normalize: false,
            },
        ],
    };

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("pipeline.json");
    fs::write(&config_path, config.to_json_string().unwrap()).unwrap();

    let loaded =
        PipelineConfig::from_json_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(loaded, config);

    let pipeline = loaded.build().unwrap();
    let doc = pipeline.run("Cat, DOG and bird.").unwrap();
    assert_eq!(doc.tokens().unwrap().texts(), vec!["cat", "dog", "and", "bird"]);
    assert_eq!(doc.embedded(), Some(&[1.0, 1.0][..]));
    assert_eq!(
        doc.steps().last().map(String::as_str),
        Some("WordEmbeddings(vectors=\"keyed\", dim=2, aggregation=\"sum\", normalize=false)")
    );
}

#[test]
fn malformed_vector_file_fails_build() {
    let vectors = write_vectors("cat 1 0\ndog 0\n");
    let json = format!(
        r#"{{"version": 1, "steps": [
            {{"type": "basic_tokenizer"}},
            {{"type": "word_embeddings", "vectors": {{"kind": "file", "path": {:?}}}}}
        ]}}"#,
        vectors.path().display().to_string()
    );
    let err = PipelineConfig::from_json_str(&json).unwrap().build().unwrap_err();
    assert_eq!(
        err,
        PipelineError::VectorLoad("line 2: expected 2 values, found 1".into())
    );
}

#[test]
fn misordered_config_rejected_before_construction() {
    let json = r#"{"steps": [
        {"type": "word_tokenizer"},
        {"type": "clean_accents", "mode": "not-a-mode"}
    ]}"#;
    let err = PipelineConfig::from_json_str(json).unwrap().build().unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("step 1 (clean_accents)"));
}

#[test]
fn cleaners_after_phrase_split_reach_the_tokens() {
    let json = r#"{"steps": [
        {"type": "split_phrases"},
        {"type": "clean_punctuation"},
        {"type": "basic_tokenizer"}
    ]}"#;
    let pipeline = PipelineConfig::from_json_str(json).unwrap().build().unwrap();
    let doc = pipeline.run("Hello, world! Bye.").unwrap();

    assert_eq!(doc.cleaned, "Hello world Bye");
    assert_eq!(doc.tokens().unwrap().texts(), vec!["Hello", "world", "Bye"]);
    assert!(doc.tokens().unwrap().is_phrased());
    assert_eq!(
        doc.steps(),
        ["SplitPhrases()", "CleanPunctuation()", "BasicTokenizer()"]
    );
}
