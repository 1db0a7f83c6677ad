//! The capability contract every Warren simulator satisfies.
//!
//! Generic code — episode drivers, agents, UIs — depends on
//! [`Environment`] and never on a simulator's internals. The trait
//! covers the full capability set: `reset`, `step`, `state` (pure
//! read), and `screenshot` (pure read).
//!
//! The action type is associated rather than fixed because two-paddle
//! Pong steps with a *pair* of actions while the other simulators step
//! with one. Simulators whose actions come from a single fixed table
//! additionally implement [`DiscreteActions`], which is what
//! index-producing agents (and the rollout driver) program against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use warren_core::{Action, ActionPool};
use warren_grid::Frame;

/// The normalized numeric summary of simulation state handed to agents.
pub type Observation = Vec<f32>;

/// Everything one tick of simulation produces.
///
/// Termination is a data value here, never an error: wall hits, paddle
/// misses, and boundary exits are expected, frequently-occurring
/// transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Observation after the tick.
    pub observation: Observation,
    /// Reward earned by the tick.
    pub reward: f32,
    /// Whether the episode ended on this tick.
    pub done: bool,
    /// Episode score, for simulators that keep one (Snake). `None`
    /// where the caller accumulates reward instead (Breakout, Pong).
    pub score: Option<u32>,
}

/// A deterministic, single-threaded grid simulator.
///
/// `step` never blocks or spawns work; it is a pure function of the
/// current state, the action, and the simulator's injected RNG (drawn
/// from only at the documented spawn/respawn points). Instances never
/// share mutable state, so independent callers may drive independent
/// instances concurrently without synchronization.
pub trait Environment {
    /// What one tick consumes: a single [`Action`] for most simulators,
    /// a `(left, right)` pair for two-paddle Pong.
    type Action;

    /// Short stable name for logs and reports.
    fn name(&self) -> &'static str;

    /// Reinitialize every entity and return the initial observation.
    fn reset(&mut self) -> Observation;

    /// Advance the simulation by exactly one tick.
    fn step(&mut self, action: Self::Action) -> Step;

    /// The current observation, without advancing the simulation.
    ///
    /// Two consecutive calls with no intervening `step` return
    /// identical vectors.
    fn state(&self) -> Observation;

    /// Render the current state as a colour grid, without advancing
    /// the simulation.
    fn screenshot(&self) -> Frame;

    /// Length of the observation vector this simulator produces.
    fn observation_len(&self) -> usize;
}

/// Simulators whose legal actions form a fixed ordered table.
///
/// The pool is the boundary where an agent's numeric output becomes a
/// symbolic [`Action`]; drivers call [`ActionPool::decode`] and never
/// hand a raw index to `step`.
pub trait DiscreteActions: Environment<Action = Action> {
    /// The ordered table of legal actions.
    fn action_pool(&self) -> ActionPool;
}
