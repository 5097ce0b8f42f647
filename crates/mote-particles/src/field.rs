//! The live particle collection
//!
//! Built once from the logo point set plus a fixed number of halo particles.
//! Nothing is spawned or removed afterwards.

use crate::particle::{MotionProfile, ParticleInstance};
use crate::points::{logo_points, GeneratedPoint};
use crate::rand::ParticleRng;
use glam::Vec3;
use mote_core::FieldConfig;

/// Full width of the halo's z spread
const HALO_DEPTH: f32 = 0.6;

pub struct ParticleField {
    instances: Vec<ParticleInstance>,
    core_count: usize,
}

impl ParticleField {
    /// One core particle per point, then `config.halo_count` halo particles
    /// scattered on a ring between the configured halo radii.
    pub fn build(points: &[GeneratedPoint], config: &FieldConfig, rng: &mut ParticleRng) -> Self {
        let mut instances = Vec::with_capacity(points.len() + config.halo_count);

        for &point in points {
            let motion = MotionProfile::core(rng, config.glyph_size);
            instances.push(ParticleInstance::new(point, motion));
        }

        for _ in 0..config.halo_count {
            let angle = rng.angle();
            let radius = rng.range(config.halo_inner_radius, config.halo_outer_radius);
            let z = rng.jitter(1.0) * HALO_DEPTH;
            let position = Vec3::new(angle.cos() * radius, angle.sin() * radius, z);
            let motion = MotionProfile::halo(rng, config.glyph_size);
            instances.push(ParticleInstance::new(position, motion));
        }

        log::info!(
            "Built particle field: {} core + {} halo",
            points.len(),
            config.halo_count
        );

        Self {
            instances,
            core_count: points.len(),
        }
    }

    /// Generate the logo points and build the field from a single seed
    pub fn from_config(config: &FieldConfig, seed: u64) -> Self {
        let mut rng = ParticleRng::new(seed);
        let points = logo_points(config, &mut rng.fork());
        Self::build(&points, config, &mut rng.fork())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn core_count(&self) -> usize {
        self.core_count
    }

    pub fn halo_count(&self) -> usize {
        self.instances.len() - self.core_count
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Advance every particle to animation time `t`
    pub fn advance(&mut self, t: f32) {
        for instance in &mut self.instances {
            instance.advance(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> FieldConfig {
        FieldConfig {
            halo_count: 40,
            ..FieldConfig::default()
        }
    }

    #[test]
    fn one_core_instance_per_point() {
        let config = small_config();
        let points = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0)];
        let mut rng = ParticleRng::new(1);
        let field = ParticleField::build(&points, &config, &mut rng);

        assert_eq!(field.len(), 42);
        assert_eq!(field.core_count(), 2);
        assert_eq!(field.halo_count(), 40);
        assert_eq!(field.instances()[1].original_position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(field.instances()[..2].iter().all(|p| !p.is_glow()));
        assert!(field.instances()[2..].iter().all(|p| p.is_glow()));
    }

    #[test]
    fn halo_sits_in_its_band() {
        let config = small_config();
        let mut rng = ParticleRng::new(2);
        let field = ParticleField::build(&[], &config, &mut rng);
        for p in field.instances() {
            let o = p.original_position();
            let r = o.truncate().length();
            assert!(r >= config.halo_inner_radius - 1e-4);
            assert!(r <= config.halo_outer_radius + 1e-4);
            assert!(o.z.abs() <= HALO_DEPTH / 2.0);
        }
    }

    #[test]
    fn profiles_are_independent() {
        let points = vec![Vec3::ZERO; 10];
        let mut rng = ParticleRng::new(3);
        let field = ParticleField::build(&points, &small_config(), &mut rng);
        let phases: Vec<u32> = field
            .instances()
            .iter()
            .map(|p| p.motion.phase_offset.to_bits())
            .collect();
        for (i, a) in phases.iter().enumerate() {
            assert!(phases[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn from_config_is_reproducible() {
        let config = FieldConfig::default();
        let a = ParticleField::from_config(&config, 77);
        let b = ParticleField::from_config(&config, 77);
        assert_eq!(a.len(), b.len());
        assert_eq!(a.halo_count(), config.halo_count);
        for (p, q) in a.instances().iter().zip(b.instances()) {
            assert_eq!(p.original_position(), q.original_position());
            assert_eq!(p.motion, q.motion);
        }
    }

    #[test]
    fn advance_keeps_count() {
        let mut field = ParticleField::from_config(&small_config(), 4);
        let before = field.len();
        for frame in 0..30 {
            field.advance(frame as f32 / 30.0);
        }
        assert_eq!(field.len(), before);
    }
}
