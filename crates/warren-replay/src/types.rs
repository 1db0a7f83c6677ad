//! Transition records and their column-wise batch form.

/// One interaction record: the agent saw `state`, took `action`, earned
/// `reward`, landed in `next_state`, and `done` says whether the
/// episode ended there.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Observation before the tick.
    pub state: Vec<f32>,
    /// The agent's action encoding (an index is a one-element vector).
    pub action: Vec<f32>,
    /// Reward earned by the tick.
    pub reward: f32,
    /// Observation after the tick.
    pub next_state: Vec<f32>,
    /// Whether the episode ended on this tick.
    pub done: bool,
}

/// A minibatch gathered column-wise: all states contiguous, all actions
/// contiguous, and so on, ready for vectorized consumption.
///
/// `states` and `next_states` hold `batch_size * state_len` values;
/// `actions` holds `batch_size * action_len`; `rewards` and `dones`
/// hold one entry per transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionBatch {
    /// Number of transitions in the batch.
    pub batch_size: usize,
    /// Width of each state row.
    pub state_len: usize,
    /// Width of each action row.
    pub action_len: usize,
    /// Flat `batch_size * state_len` state column.
    pub states: Vec<f32>,
    /// Flat `batch_size * action_len` action column.
    pub actions: Vec<f32>,
    /// One reward per transition.
    pub rewards: Vec<f32>,
    /// Flat `batch_size * state_len` next-state column.
    pub next_states: Vec<f32>,
    /// One terminal flag per transition.
    pub dones: Vec<bool>,
}

impl TransitionBatch {
    /// The `i`-th state row.
    pub fn state(&self, i: usize) -> &[f32] {
        &self.states[i * self.state_len..(i + 1) * self.state_len]
    }

    /// The `i`-th action row.
    pub fn action(&self, i: usize) -> &[f32] {
        &self.actions[i * self.action_len..(i + 1) * self.action_len]
    }

    /// The `i`-th next-state row.
    pub fn next_state(&self, i: usize) -> &[f32] {
        &self.next_states[i * self.state_len..(i + 1) * self.state_len]
    }

    /// The `i`-th transition reassembled as a row record.
    pub fn transition(&self, i: usize) -> Transition {
        Transition {
            state: self.state(i).to_vec(),
            action: self.action(i).to_vec(),
            reward: self.rewards[i],
            next_state: self.next_state(i).to_vec(),
            done: self.dones[i],
        }
    }
}
