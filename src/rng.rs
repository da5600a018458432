//! PCG32, the pseudo-random source behind key shuffling, direction and
//! permutation selection, and noise/null placement.
//!
//! The construction is the minimal PCG variant described at
//! <http://www.pcg-random.org>: a 64-bit linear congruential state advanced
//! once per output, with a permutation function (xorshift, then a
//! state-dependent rotation) applied to the *old* state to produce each
//! 32-bit word. Bit-exact reproduction of this sequence is required for the
//! "determinism under fixed seed" property, so the step and output
//! functions below must not be altered.

use getrandom::getrandom;

const MULTIPLIER: u64 = 6364136223846793005;

/// A PCG32 generator: 128 bits of state, producing a stream of uniform
/// `u32`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Seed the generator from a 128-bit `(initstate, initseq)` pair.
    pub fn seed(initstate: u64, initseq: u64) -> Self {
        let mut rng = Pcg32 {
            state: 0,
            inc: (initseq << 1) | 1,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(initstate);
        rng.next_u32();
        rng
    }

    /// Seed the generator from OS entropy (128 bits read via `getrandom`).
    /// Fails if the platform entropy source cannot be reached.
    pub fn from_entropy() -> std::io::Result<Self> {
        let mut seeds = [0u8; 16];
        getrandom(&mut seeds).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let initstate = u64::from_le_bytes(seeds[0..8].try_into().unwrap());
        let initseq = u64::from_le_bytes(seeds[8..16].try_into().unwrap());
        Ok(Self::seed(initstate, initseq))
    }

    /// Generate a uniformly distributed 32-bit value and advance the state.
    pub fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generate a value uniformly distributed in `[0, bound)` with no
    /// modulo bias, via rejection sampling against the smallest multiple of
    /// `bound` fitting in `u32`.
    pub fn bounded(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bounded() requires a positive bound");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u32();
            if r >= threshold {
                return r % bound;
            }
        }
    }

    /// Fisher-Yates shuffle of `slice`, using `bounded` for each draw.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.bounded(i as u32 + 1) as usize;
            slice.swap(i, j);
        }
    }
}
