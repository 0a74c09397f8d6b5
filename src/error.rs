//! Failures that the per-event selection logic can report

use crate::event::JetIndex;

use thiserror::Error;

/// Ways in which the inputs of a selection step can be malformed
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SelectionError {
    /// Parallel per-jet sequences did not all have the same length
    #[error("jet column {column} has {found} entries, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    /// A jet index was neither the sentinel nor a valid position
    #[error("jet index {index} is out of range for a collection of {num_jets} jets")]
    InvalidIndex { index: JetIndex, num_jets: usize },

    /// The top picker needs a pair of indices to work with
    #[error("expected two jet indices, got {0}")]
    MissingIndices(usize),

    /// A jet position was too large to be expressed as a jet index
    #[error("jet position {0} does not fit in a jet index")]
    IndexOverflow(usize),

    /// A column that the analysis reads was absent from an event record
    #[error("event record has no column named {0}")]
    MissingColumn(String),
}
