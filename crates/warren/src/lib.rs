//! Warren: deterministic grid-game training environments for
//! reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Warren sub-crates. For most users, adding `warren` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use warren::prelude::*;
//!
//! // A 7×7 snake world with a fixed seed, and a buffer matching its
//! // 12-value observation and single-index action encoding.
//! let mut env = SnakeEnv::new(SnakeConfig { grid_size: 7, seed: 42 }).unwrap();
//! let buffer = ReplayBuffer::new(1024, env.observation_len(), 1, 42).unwrap();
//!
//! // Drive one episode with a trivial policy: always the first pool
//! // entry (Up). The snake walks off the grid on the fourth tick.
//! let report = run_episode(&mut env, |_obs| 0, &buffer, 100).unwrap();
//! assert_eq!(report.ticks, 4);
//! assert!(report.terminated);
//!
//! // The interaction history is ready for a learner to resample.
//! let batch = buffer.sample(4).unwrap();
//! assert_eq!(batch.batch_size, 4);
//! assert_eq!(batch.state(0).len(), 12);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `warren-core` | Actions, action pools, shared errors |
//! | [`grid`] | `warren-grid` | Points, grids, colour frames |
//! | [`env`] | `warren-env` | The `Environment` capability trait |
//! | [`envs`] | `warren-envs` | Snake, Breakout, and Pong simulators |
//! | [`replay`] | `warren-replay` | The experience replay buffer |
//! | [`rollout`] | `warren-rollout` | The episode driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Actions, action pools, and shared error types (`warren-core`).
pub mod core {
    pub use warren_core::*;
}

/// Grid coordinates, bounds, and colour frames (`warren-grid`).
pub mod grid {
    pub use warren_grid::*;
}

/// The `Environment` capability trait (`warren-env`).
pub mod env {
    pub use warren_env::*;
}

/// The three reference simulators (`warren-envs`).
pub mod envs {
    pub use warren_envs::*;
}

/// Experience replay (`warren-replay`).
pub mod replay {
    pub use warren_replay::*;
}

/// The episode driver (`warren-rollout`).
pub mod rollout {
    pub use warren_rollout::*;
}

/// Commonly used types and traits, re-exported for convenience.
pub mod prelude {
    pub use warren_core::{Action, ActionError, ActionPool, ConfigError};
    pub use warren_env::{DiscreteActions, Environment, Observation, Step};
    pub use warren_envs::{
        BreakoutConfig, BreakoutEnv, EnvRng, PongConfig, PongEnv, SnakeConfig, SnakeEnv,
        SoloPongEnv,
    };
    pub use warren_grid::{Frame, Grid, Point, Rgb};
    pub use warren_replay::{BufferError, ReplayBuffer, Transition, TransitionBatch};
    pub use warren_rollout::{run_episode, EpisodeReport, RolloutError};
}
