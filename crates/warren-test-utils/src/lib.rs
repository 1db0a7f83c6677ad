//! Deterministic randomness sources for Warren tests.
//!
//! The simulators accept any boxed [`RngCore`], so tests can substitute
//! these fully-predictable sources for the default seeded ChaCha8 and
//! pin spawn positions exactly.

#![forbid(unsafe_code)]

use rand::RngCore;

/// An RNG that always returns zero.
///
/// `random_range(0..n)` over a zero draw always yields index 0, so a
/// simulator built on `ZeroRng` takes the first entry of every choice
/// it makes: the first free cell in row-major order for food, the first
/// velocity in a spawn table, the lowest column in a spawn band.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

/// An RNG that counts upwards in fixed increments.
///
/// `next_u64` returns the current state and then adds `increment`.
/// Useful when a test wants draws that vary but stay reproducible
/// without depending on any generator's stream.
#[derive(Clone, Debug)]
pub struct StepRng {
    state: u64,
    increment: u64,
}

impl StepRng {
    /// Start at `state`, advancing by `increment` per draw.
    pub fn new(state: u64, increment: u64) -> Self {
        Self { state, increment }
    }
}

impl RngCore for StepRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let out = self.state;
        self.state = self.state.wrapping_add(self.increment);
        out
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}
