//! Error types for the replay buffer.

use std::error::Error;
use std::fmt;

/// Errors from constructing or using a
/// [`ReplayBuffer`](crate::ReplayBuffer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A buffer needs at least one slot.
    CapacityZero,
    /// A stored column's length does not match the width fixed at
    /// construction.
    ShapeMismatch {
        /// Which column mismatched (`"state"`, `"action"`,
        /// `"next_state"`).
        column: &'static str,
        /// The width fixed at construction.
        expected: usize,
        /// The length actually supplied.
        got: usize,
    },
    /// `sample` asked for more transitions than are live.
    ///
    /// Partial or padded batches are never returned; the caller must
    /// wait until enough transitions are stored.
    NotEnoughSamples {
        /// The requested batch size.
        requested: usize,
        /// Transitions currently live.
        live: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityZero => write!(f, "replay buffer capacity must be at least 1"),
            Self::ShapeMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "{column} column has length {got}, buffer expects {expected}"
                )
            }
            Self::NotEnoughSamples { requested, live } => {
                write!(
                    f,
                    "requested batch of {requested} but only {live} transitions are live"
                )
            }
        }
    }
}

impl Error for BufferError {}
