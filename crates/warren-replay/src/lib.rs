//! Fixed-capacity experience replay for training loops.
//!
//! A [`ReplayBuffer`] stores `(state, action, reward, next_state, done)`
//! transitions in a ring: once the buffer is full, every store
//! overwrites the oldest slot. [`sample`](ReplayBuffer::sample) draws a
//! minibatch uniformly at random **with replacement** from the live
//! slots and gathers it column-wise for vectorized consumption.
//!
//! The buffer is decoupled from any environment: it sees only flat
//! numeric vectors of the widths fixed at construction.
//!
//! # Thread model
//!
//! `store` and `sample` take `&self`; one internal mutex serializes the
//! cursor, the live count, and the column storage, so one producer (the
//! interaction loop) and one consumer (the learning step) may run in
//! different execution contexts without extra locking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod types;

pub use buffer::ReplayBuffer;
pub use error::BufferError;
pub use types::{Transition, TransitionBatch};
