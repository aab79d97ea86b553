//! Deterministic random streams.
//!
//! Every consumer of randomness (agent attack choice, projectile range,
//! spawn timing and placement, shot spread) draws from an [`RngOracle`].
//! Seeding each stream from the session seed keeps whole sessions replayable.

use glam::Vec3;

/// Stateful random stream.
///
/// Implementations must be deterministic: the same seed yields the same
/// sequence.
pub trait RngOracle: Send {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in `[min, max)`. Returns `min` for an empty interval.
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    /// Uniform integer in `[min, max)`. Returns `min` for an empty interval.
    fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_u32() % (max - min)
    }

    /// Uniform index into a collection of `len` elements.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }

    /// Uniform direction on the unit sphere.
    fn unit_vector(&mut self) -> Vec3 {
        let z = self.range_f32(-1.0, 1.0);
        let theta = self.range_f32(0.0, core::f32::consts::TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit state, 32-bit output. Fast, small, and statistically
/// solid; more than enough for gameplay rolls.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent stream for one consumer of a session.
    ///
    /// `stream` distinguishes consumers (an entity id, the director, ...),
    /// `context` distinguishes several streams of the same consumer.
    pub fn stream(session_seed: u64, stream: u32, context: u32) -> Self {
        Self::seeded(compute_seed(session_seed, stream, context))
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::seeded(0x853c_49e6_748f_ea9b)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Compute a deterministic seed from session components.
///
/// # Arguments
///
/// * `session_seed` - Base seed chosen at session start
/// * `stream` - Consumer of the stream
/// * `context` - Distinguishes several streams of one consumer
pub fn compute_seed(session_seed: u64, stream: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = session_seed;
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::seeded(7);
        let mut b = PcgRng::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn streams_diverge() {
        let mut a = PcgRng::stream(1, 1, 0);
        let mut b = PcgRng::stream(1, 2, 0);
        let xs: Vec<u32> = (0..4).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..4).map(|_| b.next_u32()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = PcgRng::seeded(99);
        for _ in 0..1_000 {
            let f = rng.range_f32(6.5, 10.0);
            assert!((6.5..10.0).contains(&f));
            let i = rng.range_u32(1, 4);
            assert!((1..4).contains(&i));
            let v = rng.unit_vector();
            assert!((v.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn empty_ranges_return_lower_bound() {
        let mut rng = PcgRng::seeded(3);
        assert_eq!(rng.range_f32(2.0, 2.0), 2.0);
        assert_eq!(rng.range_u32(5, 5), 5);
        assert_eq!(rng.pick_index(0), 0);
    }
}
