//! Category preconditions: the pipeline's ordering state machine.
//!
//! States are combinations of `{tokenized, embedded}`; starting state is both
//! unset. Cleaners and tokenizers need an untokenized document, normalizers
//! and embedders need tokens and no embedding. Once `embedded` is set no
//! further category can apply.

use crate::document::DocumentState;
use crate::error::Precondition;
use crate::transformer::Category;

/// Checks whether a step of `category` may run on a document in `state`.
pub fn check(category: Category, state: DocumentState) -> Result<(), Precondition> {
    match category {
        Category::Cleaners if state.tokenized => Err(Precondition::CleanBeforeTokenize),
        Category::Tokenizers if state.tokenized => Err(Precondition::TokenizeOnce),
        Category::Normalizers if !state.tokenized || state.embedded => {
            Err(Precondition::NormalizeBeforeEmbed)
        }
        Category::Embeddings if !state.tokenized || state.embedded => Err(Precondition::EmbedOnce),
        _ => Ok(()),
    }
}
