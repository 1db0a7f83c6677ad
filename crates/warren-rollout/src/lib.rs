//! The interaction loop between an agent, a simulator, and the replay
//! buffer.
//!
//! [`run_episode`] drives one episode of a discrete-action environment:
//! each tick it asks the policy for an action index, decodes the index
//! through the environment's [`ActionPool`] (the validation boundary
//! between numeric agent output and symbolic actions), steps the
//! simulator, and stores the `(state, action, reward, next_state, done)`
//! transition in the buffer. Learning and rendering stay outside this
//! crate.
//!
//! [`ActionPool`]: warren_core::ActionPool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use warren_core::ActionError;
use warren_env::DiscreteActions;
use warren_replay::{BufferError, ReplayBuffer};

/// What one driven episode amounted to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeReport {
    /// Ticks executed (transitions stored).
    pub ticks: u64,
    /// Sum of the per-tick rewards.
    pub total_reward: f32,
    /// The environment's final score, where it keeps one.
    pub final_score: Option<u32>,
    /// Whether the episode reached `done` (as opposed to the tick
    /// budget running out).
    pub terminated: bool,
}

/// Errors from driving an episode.
#[derive(Clone, Debug, PartialEq)]
pub enum RolloutError {
    /// The policy produced an index outside the environment's pool.
    Action(ActionError),
    /// Storing a transition failed (shape mismatch against the buffer).
    Buffer(BufferError),
}

impl std::fmt::Display for RolloutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action(e) => write!(f, "policy action rejected: {e}"),
            Self::Buffer(e) => write!(f, "transition store failed: {e}"),
        }
    }
}

impl std::error::Error for RolloutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Action(e) => Some(e),
            Self::Buffer(e) => Some(e),
        }
    }
}

impl From<ActionError> for RolloutError {
    fn from(e: ActionError) -> Self {
        Self::Action(e)
    }
}

impl From<BufferError> for RolloutError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

/// Drive one episode from `reset` to `done` (or `max_ticks`), storing
/// every transition in `buffer`.
///
/// The policy sees the current observation and returns an index into
/// the environment's action pool; the stored action column is that
/// index as a one-element `f32` row, so the buffer's `action_len`
/// must be 1.
pub fn run_episode<E, P>(
    env: &mut E,
    mut policy: P,
    buffer: &ReplayBuffer,
    max_ticks: u64,
) -> Result<EpisodeReport, RolloutError>
where
    E: DiscreteActions,
    P: FnMut(&[f32]) -> usize,
{
    let pool = env.action_pool();
    let mut state = env.reset();
    let mut report = EpisodeReport {
        ticks: 0,
        total_reward: 0.0,
        final_score: None,
        terminated: false,
    };

    while report.ticks < max_ticks {
        let index = policy(&state);
        let action = pool.decode(index)?;
        let step = env.step(action);

        buffer.store(
            &state,
            &[index as f32],
            step.reward,
            &step.observation,
            step.done,
        )?;

        report.ticks += 1;
        report.total_reward += step.reward;
        report.final_score = step.score;
        state = step.observation;

        if step.done {
            report.terminated = true;
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_envs::{BreakoutConfig, BreakoutEnv, SnakeConfig, SnakeEnv};
    use warren_test_utils::ZeroRng;

    /// A snake whose food is pinned to (0, 0), clear of the walk-up
    /// path the tests drive.
    fn snake() -> SnakeEnv {
        SnakeEnv::with_rng(SnakeConfig::default(), Box::new(ZeroRng)).unwrap()
    }

    #[test]
    fn every_tick_lands_one_transition_in_the_buffer() {
        let mut env = snake();
        let buffer = ReplayBuffer::new(256, 12, 1, 0).unwrap();
        // Always heading up: the snake walks off the grid in three
        // ticks and dies on the fourth.
        let report = run_episode(&mut env, |_| 0, &buffer, 100).unwrap();
        assert_eq!(report.ticks, 4);
        assert!(report.terminated);
        assert_eq!(buffer.stored(), 4);
        let batch = buffer.sample(4).unwrap();
        assert_eq!(batch.state(0).len(), 12);
    }

    #[test]
    fn the_tick_budget_caps_an_unterminated_episode() {
        // The Breakout ball spawns at row 11 and needs 13 ticks to
        // reach the floor, so a 10-tick budget always runs out first.
        let mut env = BreakoutEnv::new(BreakoutConfig::default()).unwrap();
        let buffer = ReplayBuffer::new(256, 4, 1, 0).unwrap();
        let report = run_episode(&mut env, |_| 0, &buffer, 10).unwrap();
        assert_eq!(report.ticks, 10);
        assert!(!report.terminated);
        assert_eq!(buffer.stored(), 10);
    }

    #[test]
    fn rewards_accumulate_into_the_report() {
        let mut env = snake();
        let buffer = ReplayBuffer::new(256, 12, 1, 0).unwrap();
        let report = run_episode(&mut env, |_| 0, &buffer, 100).unwrap();
        // Three moves at -0.1 and one death at -1.0.
        assert!((report.total_reward - (-1.3)).abs() < 1e-6);
        assert_eq!(report.final_score, Some(0));
    }

    #[test]
    fn an_out_of_pool_index_is_rejected_at_the_boundary() {
        let mut env = BreakoutEnv::new(BreakoutConfig::default()).unwrap();
        let buffer = ReplayBuffer::new(64, 4, 1, 0).unwrap();
        // Breakout's pool has two entries; index 2 must never reach
        // the simulator.
        let err = run_episode(&mut env, |_| 2, &buffer, 10).unwrap_err();
        assert!(matches!(err, RolloutError::Action(_)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn a_mismatched_buffer_is_rejected_on_the_first_store() {
        let mut env = snake();
        let buffer = ReplayBuffer::new(64, 4, 1, 0).unwrap();
        let err = run_episode(&mut env, |_| 0, &buffer, 10).unwrap_err();
        assert!(matches!(err, RolloutError::Buffer(_)));
    }
}
