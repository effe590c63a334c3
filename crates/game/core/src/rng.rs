//! Seedable random source shared by every draw in a battle.
//!
//! A battle owns exactly one stream. Dodge checks, per-target area rolls,
//! monster action selection and the monster preview each consume one value
//! from it in a fixed call order, so replaying a seed together with the same
//! hero inputs reproduces the battle exactly.

/// Random source consumed by the battle engine.
///
/// Implementations must be deterministic: the same seed yields the same
/// sequence of values.
pub trait RandomSource {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Widening multiply avoids the modulo bias of `next_u32() % bound`.
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        (**self).next_int(bound)
    }

    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        (**self).next_int(bound)
    }

    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose stream is fully determined by `seed`.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut rng = Self {
            state: mix_seed(seed),
        };
        // Discard the first output so nearby seeds diverge immediately.
        rng.step();
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(&mut self) -> u64 {
        let old = self.state;
        self.state = old
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        old
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let state = self.step();
        Self::output(state)
    }

    /// 53-bit precision from two consecutive outputs; still a single draw of the stream.
    fn next_f64(&mut self) -> f64 {
        let hi = u64::from(self.next_u32() >> 5);
        let lo = u64::from(self.next_u32() >> 6);
        ((hi << 26) | lo) as f64 / (1u64 << 53) as f64
    }
}

/// SplitMix64-style avalanche so that small seeds spread across the state.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// Replays a fixed list of rolls, cycling when exhausted.
///
/// Intended for tests that need to script exact dodge and behavior draws.
/// `next_int` maps the next roll onto `[0, bound)`.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    rolls: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl SequenceRng {
    /// Creates a source that yields `rolls` in order. Values are clamped into `[0, 1)`.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        let rolls = rolls
            .into_iter()
            .map(|r| r.clamp(0.0, 0.999_999_999))
            .collect();
        Self {
            rolls,
            cursor: 0,
            draws: 0,
        }
    }

    /// A source that always yields `roll`.
    pub fn constant(roll: f64) -> Self {
        Self::new([roll])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let roll = self.next_f64();
        ((roll * f64::from(bound)) as u32).min(bound - 1)
    }

    fn next_bool(&mut self) -> bool {
        self.next_f64() >= 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PcgRng::seed_from_u64(42);
        let mut b = PcgRng::seed_from_u64(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::seed_from_u64(1);
        let mut b = PcgRng::seed_from_u64(2);
        let first_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let first_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(first_a, first_b);
    }

    #[test]
    fn ranges_are_respected() {
        let mut rng = PcgRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
            assert!(rng.next_int(3) < 3);
        }
        assert_eq!(rng.next_int(0), 0);
    }

    #[test]
    fn sequence_rng_replays_and_counts() {
        let mut rng = SequenceRng::new([0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_int(4), 3);
        assert_eq!(rng.draws(), 4);
    }
}
