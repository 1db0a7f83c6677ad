//! The fixed-capacity transition ring with uniform resampling.

use crate::error::BufferError;
use crate::types::TransitionBatch;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// A fixed-capacity circular store of interaction transitions.
///
/// Writes go to `cursor % capacity`; the cursor is monotonically
/// increasing and never wraps, so the live count is
/// `min(cursor, capacity)`. Once the buffer is full, every store
/// silently overwrites the oldest slot — that overwrite is the intended
/// behaviour, not an error.
///
/// Columns are stored flat (`capacity * state_len` floats per state
/// column, and so on) so that a sampled minibatch gathers straight into
/// the column-wise [`TransitionBatch`] shape.
pub struct ReplayBuffer {
    capacity: usize,
    state_len: usize,
    action_len: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    /// Monotonic write position; slot index is `cursor % capacity`.
    cursor: u64,
    states: Vec<f32>,
    actions: Vec<f32>,
    rewards: Vec<f32>,
    next_states: Vec<f32>,
    dones: Vec<bool>,
    rng: Box<dyn RngCore + Send>,
}

// Compile-time assertion: ReplayBuffer must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<ReplayBuffer>();
};

impl ReplayBuffer {
    /// Create a buffer of `capacity` transitions whose state rows are
    /// `state_len` wide and action rows `action_len` wide, sampling
    /// with a ChaCha8 generator seeded from `seed`.
    ///
    /// Fails with [`BufferError::CapacityZero`] when `capacity == 0`.
    pub fn new(
        capacity: usize,
        state_len: usize,
        action_len: usize,
        seed: u64,
    ) -> Result<Self, BufferError> {
        Self::with_rng(
            capacity,
            state_len,
            action_len,
            Box::new(ChaCha8Rng::seed_from_u64(seed)),
        )
    }

    /// Create a buffer with an explicit sampling source instead of the
    /// seeded default.
    pub fn with_rng(
        capacity: usize,
        state_len: usize,
        action_len: usize,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::CapacityZero);
        }
        Ok(Self {
            capacity,
            state_len,
            action_len,
            inner: Mutex::new(Inner {
                cursor: 0,
                states: vec![0.0; capacity * state_len],
                actions: vec![0.0; capacity * action_len],
                rewards: vec![0.0; capacity],
                next_states: vec![0.0; capacity * state_len],
                dones: vec![false; capacity],
                rng,
            }),
        })
    }

    /// The buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width of each state row.
    pub fn state_len(&self) -> usize {
        self.state_len
    }

    /// Width of each action row.
    pub fn action_len(&self) -> usize {
        self.action_len
    }

    /// Transitions currently live (up to `capacity`).
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        self.live(&inner)
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().cursor == 0
    }

    /// Total transitions ever stored, including overwritten ones.
    pub fn stored(&self) -> u64 {
        self.inner.lock().unwrap().cursor
    }

    /// Append one transition, overwriting the oldest once full. O(1).
    pub fn store(
        &self,
        state: &[f32],
        action: &[f32],
        reward: f32,
        next_state: &[f32],
        done: bool,
    ) -> Result<(), BufferError> {
        self.check_shape("state", state.len(), self.state_len)?;
        self.check_shape("action", action.len(), self.action_len)?;
        self.check_shape("next_state", next_state.len(), self.state_len)?;

        let mut inner = self.inner.lock().unwrap();
        let slot = (inner.cursor % self.capacity as u64) as usize;

        let s = slot * self.state_len;
        inner.states[s..s + self.state_len].copy_from_slice(state);
        inner.next_states[s..s + self.state_len].copy_from_slice(next_state);

        let a = slot * self.action_len;
        inner.actions[a..a + self.action_len].copy_from_slice(action);

        inner.rewards[slot] = reward;
        inner.dones[slot] = done;
        inner.cursor += 1;
        Ok(())
    }

    /// Draw `batch_size` transitions uniformly at random, with
    /// replacement, from the live slots.
    ///
    /// Fails with [`BufferError::NotEnoughSamples`] when fewer than
    /// `batch_size` transitions are live; a partial batch is never
    /// returned. Repeated slots within one batch are expected —
    /// sampling is memoryless by design.
    pub fn sample(&self, batch_size: usize) -> Result<TransitionBatch, BufferError> {
        let mut inner = self.inner.lock().unwrap();
        let live = self.live(&inner);
        if live < batch_size {
            return Err(BufferError::NotEnoughSamples {
                requested: batch_size,
                live,
            });
        }

        let mut batch = TransitionBatch {
            batch_size,
            state_len: self.state_len,
            action_len: self.action_len,
            states: Vec::with_capacity(batch_size * self.state_len),
            actions: Vec::with_capacity(batch_size * self.action_len),
            rewards: Vec::with_capacity(batch_size),
            next_states: Vec::with_capacity(batch_size * self.state_len),
            dones: Vec::with_capacity(batch_size),
        };

        for _ in 0..batch_size {
            let slot = inner.rng.random_range(0..live);
            let s = slot * self.state_len;
            batch
                .states
                .extend_from_slice(&inner.states[s..s + self.state_len]);
            batch
                .next_states
                .extend_from_slice(&inner.next_states[s..s + self.state_len]);
            let a = slot * self.action_len;
            batch
                .actions
                .extend_from_slice(&inner.actions[a..a + self.action_len]);
            batch.rewards.push(inner.rewards[slot]);
            batch.dones.push(inner.dones[slot]);
        }
        Ok(batch)
    }

    fn live(&self, inner: &Inner) -> usize {
        (inner.cursor).min(self.capacity as u64) as usize
    }

    fn check_shape(
        &self,
        column: &'static str,
        got: usize,
        expected: usize,
    ) -> Result<(), BufferError> {
        if got != expected {
            return Err(BufferError::ShapeMismatch {
                column,
                expected,
                got,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_test_utils::ZeroRng;

    /// Store transition number `i` as a self-consistent tuple so a
    /// sampled row can be checked for tearing.
    fn store_nth(buffer: &ReplayBuffer, i: usize) {
        let v = i as f32;
        buffer
            .store(&[v, v], &[v * 2.0], v, &[v + 1.0, v + 1.0], i % 3 == 0)
            .unwrap();
    }

    #[test]
    fn construction_rejects_zero_capacity() {
        assert_eq!(
            ReplayBuffer::new(0, 2, 1, 0).err(),
            Some(BufferError::CapacityZero)
        );
    }

    #[test]
    fn len_saturates_at_capacity() {
        let buffer = ReplayBuffer::new(4, 2, 1, 0).unwrap();
        assert!(buffer.is_empty());
        for i in 0..6 {
            store_nth(&buffer, i);
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.stored(), 6);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn overwrite_evicts_the_oldest_in_fifo_order() {
        let buffer = ReplayBuffer::new(4, 2, 1, 0).unwrap();
        for i in 0..6 {
            store_nth(&buffer, i);
        }
        // Slots hold, in ring order, transitions [4, 5, 2, 3]: the
        // oldest two (0 and 1) are unrecoverable.
        let inner = buffer.inner.lock().unwrap();
        assert_eq!(inner.rewards, vec![4.0, 5.0, 2.0, 3.0]);
        assert_eq!(inner.states, vec![4.0, 4.0, 5.0, 5.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn store_rejects_mismatched_columns() {
        let buffer = ReplayBuffer::new(4, 2, 1, 0).unwrap();
        let err = buffer.store(&[1.0], &[0.0], 0.0, &[1.0, 2.0], false);
        assert_eq!(
            err,
            Err(BufferError::ShapeMismatch {
                column: "state",
                expected: 2,
                got: 1
            })
        );
        let err = buffer.store(&[1.0, 2.0], &[0.0, 0.0], 0.0, &[1.0, 2.0], false);
        assert_eq!(
            err,
            Err(BufferError::ShapeMismatch {
                column: "action",
                expected: 1,
                got: 2
            })
        );
        let err = buffer.store(&[1.0, 2.0], &[0.0], 0.0, &[1.0], false);
        assert_eq!(
            err,
            Err(BufferError::ShapeMismatch {
                column: "next_state",
                expected: 2,
                got: 1
            })
        );
        // Nothing was written by the rejected calls.
        assert!(buffer.is_empty());
    }

    #[test]
    fn sample_refuses_underfilled_buffers() {
        let buffer = ReplayBuffer::new(8, 2, 1, 0).unwrap();
        store_nth(&buffer, 0);
        store_nth(&buffer, 1);
        assert_eq!(
            buffer.sample(3).err(),
            Some(BufferError::NotEnoughSamples {
                requested: 3,
                live: 2
            })
        );
        assert!(buffer.sample(2).is_ok());
    }

    #[test]
    fn sample_gathers_exactly_batch_size_column_wise() {
        let buffer = ReplayBuffer::new(8, 2, 1, 0).unwrap();
        for i in 0..5 {
            store_nth(&buffer, i);
        }
        let batch = buffer.sample(3).unwrap();
        assert_eq!(batch.batch_size, 3);
        assert_eq!(batch.states.len(), 6);
        assert_eq!(batch.actions.len(), 3);
        assert_eq!(batch.rewards.len(), 3);
        assert_eq!(batch.next_states.len(), 6);
        assert_eq!(batch.dones.len(), 3);
        for i in 0..3 {
            let t = batch.transition(i);
            // Each row must be one of the stored tuples, untorn.
            assert_eq!(t.state[0], t.state[1]);
            assert_eq!(t.action[0], t.state[0] * 2.0);
            assert_eq!(t.reward, t.state[0]);
            assert_eq!(t.next_state[0], t.state[0] + 1.0);
        }
    }

    #[test]
    fn sample_only_sees_live_slots_after_overwrite() {
        let buffer = ReplayBuffer::new(4, 2, 1, 7).unwrap();
        for i in 0..7 {
            store_nth(&buffer, i);
        }
        let batch = buffer.sample(4).unwrap();
        for i in 0..4 {
            let reward = batch.rewards[i];
            assert!(
                (3.0..=6.0).contains(&reward),
                "sampled overwritten transition {reward}"
            );
        }
    }

    #[test]
    fn sampling_is_with_replacement() {
        // A zero source draws slot 0 every time: a batch larger than
        // one distinct slot only exists because replacement is allowed.
        let buffer = ReplayBuffer::with_rng(8, 2, 1, Box::new(ZeroRng)).unwrap();
        for i in 0..4 {
            store_nth(&buffer, i);
        }
        let batch = buffer.sample(3).unwrap();
        assert_eq!(batch.rewards, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn every_live_slot_is_reachable() {
        let buffer = ReplayBuffer::new(4, 2, 1, 42).unwrap();
        for i in 0..4 {
            store_nth(&buffer, i);
        }
        let batch = buffer.sample(256).err();
        assert!(batch.is_some(), "batch larger than live count must fail");
        // 256 draws of 4 slots: each slot appears with overwhelming
        // probability under any healthy generator, and deterministically
        // under this fixed seed.
        let mut seen = [false; 4];
        for _ in 0..64 {
            let batch = buffer.sample(4).unwrap();
            for &r in &batch.rewards {
                seen[r as usize] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn equal_seeds_sample_identically() {
        let a = ReplayBuffer::new(8, 2, 1, 3).unwrap();
        let b = ReplayBuffer::new(8, 2, 1, 3).unwrap();
        for i in 0..6 {
            store_nth(&a, i);
            store_nth(&b, i);
        }
        for _ in 0..5 {
            assert_eq!(a.sample(4).unwrap(), b.sample(4).unwrap());
        }
    }

    // ── Cross-thread integration ───────────────────────────────────

    #[test]
    fn concurrent_store_and_sample_never_tear() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::thread;

        let buffer = Arc::new(ReplayBuffer::new(64, 2, 1, 9).unwrap());
        let producer_done = Arc::new(AtomicBool::new(false));

        let buf_prod = Arc::clone(&buffer);
        let done_flag = Arc::clone(&producer_done);
        let producer = thread::spawn(move || {
            for i in 0..2000 {
                store_nth(&buf_prod, i);
            }
            done_flag.store(true, Ordering::Release);
        });

        let buf_cons = Arc::clone(&buffer);
        let done_cons = Arc::clone(&producer_done);
        let consumer = thread::spawn(move || {
            let mut batches = 0u64;
            loop {
                if let Ok(batch) = buf_cons.sample(8) {
                    for i in 0..batch.batch_size {
                        let t = batch.transition(i);
                        assert_eq!(t.state[0], t.state[1]);
                        assert_eq!(t.action[0], t.state[0] * 2.0);
                        assert_eq!(t.reward, t.state[0]);
                        assert_eq!(t.next_state[0], t.state[0] + 1.0);
                    }
                    batches += 1;
                }
                if done_cons.load(Ordering::Acquire) && batches > 0 {
                    break;
                }
                thread::yield_now();
            }
            batches
        });

        producer.join().unwrap();
        let batches = consumer.join().unwrap();
        assert!(batches > 0);
        assert_eq!(buffer.len(), 64);
        assert_eq!(buffer.stored(), 2000);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_tracks_min_of_stores_and_capacity(
                capacity in 1usize..32,
                stores in 0usize..100,
            ) {
                let buffer = ReplayBuffer::new(capacity, 1, 1, 0).unwrap();
                for i in 0..stores {
                    buffer.store(&[i as f32], &[0.0], 0.0, &[0.0], false).unwrap();
                }
                prop_assert_eq!(buffer.len(), stores.min(capacity));
                prop_assert_eq!(buffer.stored(), stores as u64);
            }

            #[test]
            fn samples_come_only_from_the_newest_capacity_stores(
                capacity in 1usize..16,
                extra in 1usize..32,
                batch in 1usize..8,
            ) {
                let stores = capacity + extra;
                let buffer = ReplayBuffer::new(capacity, 1, 1, 5).unwrap();
                for i in 0..stores {
                    buffer.store(&[i as f32], &[0.0], 0.0, &[0.0], false).unwrap();
                }
                let batch_size = batch.min(capacity);
                let sampled = buffer.sample(batch_size).unwrap();
                let oldest_live = (stores - capacity) as f32;
                for i in 0..batch_size {
                    prop_assert!(sampled.state(i)[0] >= oldest_live);
                }
            }
        }
    }
}
