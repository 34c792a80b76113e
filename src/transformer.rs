//! The calling contract shared by every pipeline step.
//!
//! A concrete step only supplies its [`Category`], its name and parameters,
//! and the body in [`Transformer::apply`]. The provided methods route every
//! call through [`run_step`], which checks the category precondition, runs
//! the body and appends the step description to the document's audit log.
//!
//! Two calling modes:
//!
//! - [`Transformer::transform`] works on an independent copy and returns it;
//!   the caller's document is never touched.
//! - [`Transformer::transform_in_place`] mutates the given document and
//!   returns nothing.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::{Document, Input};
use crate::error::PipelineError;
use crate::validation;

/// Step category; selects the precondition a step is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cleaners,
    Tokenizers,
    Normalizers,
    Embeddings,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Cleaners => "cleaners",
            Category::Tokenizers => "tokenizers",
            Category::Normalizers => "normalizers",
            Category::Embeddings => "embeddings",
        };
        f.write_str(name)
    }
}

/// A single categorized pipeline step.
pub trait Transformer: Send + Sync {
    fn category(&self) -> Category;

    /// Step name used in the audit log.
    fn name(&self) -> &'static str;

    /// Constructor configuration, rendered as `key=value` pairs in
    /// [`describe`](Transformer::describe). Values are already formatted.
    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Canonical representation recorded in `Document::steps`, e.g.
    /// `CleanAccents(mode="unicode")`.
    fn describe(&self) -> String {
        let params = self
            .params()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params})", self.name())
    }

    /// Step body. Called only after the precondition passed; must not touch
    /// `steps`.
    fn apply(&self, doc: &mut Document) -> Result<(), PipelineError>;

    /// Runs the step on an independent document built from `input` and
    /// returns it.
    fn transform(&self, input: impl Into<Input>) -> Result<Document, PipelineError>
    where
        Self: Sized,
    {
        let mut doc = input.into().into_document()?;
        run_step(self, &mut doc)?;
        Ok(doc)
    }

    /// Runs the step directly on `doc`.
    ///
    /// A sequencing failure leaves `doc` untouched. A body failure may leave
    /// partial edits behind; use [`transform`](Transformer::transform) when
    /// that matters.
    fn transform_in_place(&self, doc: &mut Document) -> Result<(), PipelineError> {
        run_step(self, doc)
    }
}

/// Validate, apply, record. The one wrapper every step goes through.
pub fn run_step<T: Transformer + ?Sized>(
    step: &T,
    doc: &mut Document,
) -> Result<(), PipelineError> {
    let start = Instant::now();
    let description = step.describe();
    let category = step.category();

    let span = tracing::debug_span!("textprep.step", step = %description, category = %category);
    let _guard = span.enter();

    let result = validation::check(category, doc.state())
        .map_err(|precondition| PipelineError::Sequencing {
            step: description.clone(),
            precondition,
        })
        .and_then(|()| step.apply(doc));

    let elapsed_micros = start.elapsed().as_micros();
    match result {
        Ok(()) => {
            doc.record_step(description);
            debug!(elapsed_micros, "step_success");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, elapsed_micros, "step_failure");
            Err(err)
        }
    }
}

/// Formats a string parameter the way `describe` shows it.
pub(crate) fn quoted(value: &str) -> String {
    format!("{value:?}")
}
