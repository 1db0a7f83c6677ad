//! Shared helpers for the Warren benchmark suite.
//!
//! The benchmarks live under `benches/`; this library only hosts the
//! fixtures they share.

#![forbid(unsafe_code)]

use warren_core::Action;
use warren_env::Environment;

/// Drive `env` for `ticks` steps with a fixed action cycle, resetting
/// whenever an episode ends. Returns the number of resets, so the
/// result cannot be optimized away.
pub fn drive<E: Environment<Action = Action>>(env: &mut E, ticks: u64) -> u64 {
    const CYCLE: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];
    let mut resets = 0;
    env.reset();
    for tick in 0..ticks {
        let step = env.step(CYCLE[(tick % 4) as usize]);
        if step.done {
            env.reset();
            resets += 1;
        }
    }
    resets
}
