//! Reference simulators for the Warren framework.
//!
//! Three deterministic grid games, each a training ground for
//! reinforcement-learning agents behind the shared
//! [`Environment`](warren_env::Environment) contract:
//!
//! - [`SnakeEnv`] — snake growth on an odd square grid
//! - [`BreakoutEnv`] — brick breaking with a banked paddle return
//! - [`PongEnv`] / [`SoloPongEnv`] — two-paddle ball duel, optionally
//!   against a deterministic tracking opponent
//!
//! # Determinism contract
//!
//! A simulator draws randomness only at its documented spawn points
//! (reset spawns and food respawn), always from the [`EnvRng`] injected
//! at construction. The default source is a ChaCha8 generator seeded
//! from the config, so equal seeds and equal action sequences reproduce
//! a run bit-for-bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod breakout;
pub mod pong;
pub mod snake;

pub use breakout::{BreakoutConfig, BreakoutEnv};
pub use pong::{PongConfig, PongEnv, SoloPongEnv};
pub use snake::{SnakeConfig, SnakeEnv};

/// The randomness source a simulator owns.
///
/// Boxed so tests can substitute a scripted source; `Send` so a
/// simulator can move to whichever thread drives it.
pub type EnvRng = Box<dyn RngCore + Send>;

/// The default source for a config's seed.
pub(crate) fn rng_from_seed(seed: u64) -> EnvRng {
    Box::new(ChaCha8Rng::seed_from_u64(seed))
}

// Compile-time assertion: every simulator must be Send, so independent
// callers can drive independent instances from their own threads.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<SnakeEnv>();
    assert::<BreakoutEnv>();
    assert::<PongEnv>();
    assert::<SoloPongEnv>();
};
