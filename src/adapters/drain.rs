//! Pseudo-random drain source.
//!
//! Stands in for a real level sensor: once per simulated day the
//! controller asks for a bounded drain amount. The generator is the
//! classic C-library linear congruential sequence, which keeps the
//! simulation deterministic for a given seed (and reproducible in tests).

use crate::ports::DrainPort;

/// LCG-backed [`DrainPort`] yielding values in `0..=max`.
pub struct LcgDrain {
    state: u32,
    max: u32,
}

impl LcgDrain {
    pub fn new(seed: u32, max: u32) -> Self {
        Self { state: seed, max }
    }

    /// ANSI C `rand()` step: 31-bit output, modulus reduction by caller.
    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.state >> 16) & 0x7FFF
    }
}

impl DrainPort for LcgDrain {
    fn next_drain(&mut self) -> u32 {
        self.next_raw() % (self.max + 1)
    }
}
