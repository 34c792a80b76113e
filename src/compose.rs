//! Ordered sequences of steps.
//!
//! ```rust
//! use textprep::{BasicTokenizer, CaseTokens, CleanPunctuation, Compose};
//!
//! let pipeline = Compose::new()
//!     .with(CleanPunctuation::new())
//!     .with(BasicTokenizer::new())
//!     .with(CaseTokens::default());
//!
//! let doc = pipeline.run("Hello, World!").unwrap();
//! assert_eq!(doc.tokens().unwrap().texts(), vec!["hello", "world"]);
//! assert_eq!(doc.steps().len(), 3);
//! ```

use std::fmt;
use std::time::Instant;

use tracing::{debug, info};

use crate::document::{Document, Input};
use crate::error::PipelineError;
use crate::transformer::Transformer;

/// A pipeline: steps applied in insertion order, each recording itself in
/// the document's audit log. The first failing step aborts the run.
#[derive(Default)]
pub struct Compose {
    steps: Vec<Box<dyn Transformer>>,
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<Box<dyn Transformer>>) -> Self {
        Self { steps }
    }

    /// Appends a step, builder style.
    pub fn with<T: Transformer + 'static>(mut self, step: T) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn push(&mut self, step: Box<dyn Transformer>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Descriptions of the configured steps, in order.
    pub fn describe(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.describe()).collect()
    }

    /// Runs every step on an independent document built from `input`.
    pub fn run(&self, input: impl Into<Input>) -> Result<Document, PipelineError> {
        let mut doc = input.into().into_document()?;
        self.run_in_place(&mut doc)?;
        Ok(doc)
    }

    /// Runs every step directly on `doc`. Steps that succeeded before a
    /// failure stay applied.
    pub fn run_in_place(&self, doc: &mut Document) -> Result<(), PipelineError> {
        let start = Instant::now();
        for (index, step) in self.steps.iter().enumerate() {
            if let Err(err) = step.transform_in_place(doc) {
                debug!(
                    failed_step = index,
                    steps = self.steps.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "pipeline_failure"
                );
                return Err(err);
            }
        }
        info!(
            steps = self.steps.len(),
            tokens = doc.tokens().map_or(0, |tokens| tokens.len()),
            embedded = doc.embedded().is_some(),
            elapsed_micros = start.elapsed().as_micros(),
            "pipeline_success"
        );
        Ok(())
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("steps", &self.describe())
            .finish()
    }
}
