//! Seeded random source for point jitter and motion profiles

use ::rand::rngs::StdRng;
use ::rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::TAU;

pub struct ParticleRng {
    inner: StdRng,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Split off an independent stream, so one consumer drawing more numbers
    /// does not shift what the next consumer sees
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Symmetric jitter: `(U(0,1) - 0.5) * amplitude`, in [-amplitude/2, amplitude/2)
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        (self.next_f32() - 0.5) * amplitude
    }

    /// Uniform angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn jitter_is_symmetric_and_bounded() {
        let mut rng = ParticleRng::new(7);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let j = rng.jitter(0.1);
            assert!((-0.05..0.05).contains(&j));
            sum += j;
        }
        assert!((sum / 10_000.0f32).abs() < 0.005);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..16 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn forks_are_independent_of_parent_usage() {
        let mut parent = ParticleRng::new(5);
        let mut first = parent.fork();
        let mut second = parent.fork();
        assert_ne!(first.next_f32().to_bits(), second.next_f32().to_bits());
    }
}
