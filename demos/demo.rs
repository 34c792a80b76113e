use std::sync::Arc;

use textprep::{
    BasicTokenizer, CaseTokens, CleanAccents, CleanEol, CleanMarkup, CleanNumber,
    CleanPunctuation, CleanUrl, Compose, HashedVectors, PipelineConfig, RemoveStopWords,
    WordEmbeddings,
};
use tracing_subscriber::EnvFilter;

const TEXT: &str = "<p>Visit https://example.com for the 2 best Crème brûlée recipes!</p>\n\
<p>They are Ready in 30 minutes.</p>";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let vectors = Arc::new(HashedVectors::new(8, true).expect("valid dimension"));
    let pipeline = Compose::new()
        .with(CleanMarkup::new("html").expect("markup feature enabled"))
        .with(CleanUrl::new())
        .with(CleanNumber::new())
        .with(CleanEol::new())
        .with(CleanAccents::new("ascii").expect("known accent mode"))
        .with(CleanPunctuation::new())
        .with(BasicTokenizer::new())
        .with(CaseTokens::default())
        .with(RemoveStopWords::english())
        .with(WordEmbeddings::new(vectors, "mean").expect("known aggregation"));

    let doc = pipeline.run(TEXT).expect("pipeline runs");
    println!("cleaned: {}", doc.cleaned);
    println!();
    println!("tokens: {:?}", doc.tokens().map(|tokens| tokens.texts()));
    println!();
    println!("embedded: {:?}", doc.embedded());
    println!();
    for step in doc.steps() {
        println!("step: {step}");
    }

    let config = PipelineConfig::default();
    println!();
    println!(
        "default config: {}",
        config.to_json_string().expect("config serializes")
    );
}
