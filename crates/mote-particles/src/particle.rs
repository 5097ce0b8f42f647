//! Particle types: per-instance motion state and GPU instance data

use crate::rand::ParticleRng;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-frame increment applied to each axis of the self-rotation, per unit speed
pub const ROTATION_STEP: f32 = 0.005;

/// Relative amplitude of the scale pulse
pub const PULSE_SCALE: f32 = 0.15;

/// Independent oscillation parameters for one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    pub phase_offset: f32,
    pub pulse_speed: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub rotation_speed: Vec3,
    pub base_scale: f32,
    /// Halo particles are dimmer and pulse less than core particles
    pub is_glow: bool,
}

impl MotionProfile {
    /// Profile for a particle bound to a logo point
    pub fn core(rng: &mut ParticleRng, glyph_size: f32) -> Self {
        Self {
            phase_offset: rng.angle(),
            pulse_speed: rng.range(0.5, 2.0),
            orbit_radius: rng.range(0.005, 0.03),
            orbit_speed: rng.range(0.2, 0.8),
            rotation_speed: Vec3::new(
                rng.range(-1.0, 1.0),
                rng.range(-1.0, 1.0),
                rng.range(-1.0, 1.0),
            ),
            base_scale: rng.range(0.6, 1.0) * glyph_size,
            is_glow: false,
        }
    }

    /// Profile for a free-floating halo particle
    pub fn halo(rng: &mut ParticleRng, glyph_size: f32) -> Self {
        Self {
            phase_offset: rng.angle(),
            pulse_speed: rng.range(0.3, 1.0),
            orbit_radius: rng.range(0.02, 0.08),
            orbit_speed: rng.range(0.1, 0.4),
            rotation_speed: Vec3::new(
                rng.range(-0.5, 0.5),
                rng.range(-0.5, 0.5),
                rng.range(-0.5, 0.5),
            ),
            base_scale: rng.range(0.3, 0.6) * glyph_size,
            is_glow: true,
        }
    }

    /// Periodic displacement from the original position at time `t`
    pub fn orbit_offset(&self, t: f32) -> Vec3 {
        let w = self.orbit_speed;
        let phi = self.phase_offset;
        let r = self.orbit_radius;
        Vec3::new(
            (t * w + phi).sin() * r,
            (t * w * 1.2 + phi).cos() * r,
            (t * w * 0.8 + phi).sin() * r * 0.5,
        )
    }

    /// Pulse value in [-1, 1] at time `t`
    pub fn pulse(&self, t: f32) -> f32 {
        (t * self.pulse_speed + self.phase_offset).sin()
    }

    /// Opacity for a pulse value: halo in [0.05, 0.25], core in [0.40, 0.90]
    pub fn opacity(&self, pulse: f32) -> f32 {
        if self.is_glow {
            0.1 + pulse * 0.1 + 0.05
        } else {
            0.5 + pulse * 0.25 + 0.15
        }
    }
}

/// A live particle. The original position is fixed at construction; every
/// frame recomputes `position` from it, so motion never accumulates drift.
#[derive(Clone, Debug)]
pub struct ParticleInstance {
    original_position: Vec3,
    pub motion: MotionProfile,
    pub position: Vec3,
    /// Cumulative Euler self-rotation in radians
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl ParticleInstance {
    pub fn new(original_position: Vec3, motion: MotionProfile) -> Self {
        Self {
            original_position,
            motion,
            position: original_position,
            rotation: Vec3::ZERO,
            scale: motion.base_scale,
            opacity: motion.opacity(0.0),
        }
    }

    pub fn original_position(&self) -> Vec3 {
        self.original_position
    }

    pub fn is_glow(&self) -> bool {
        self.motion.is_glow
    }

    /// Recompute transform and opacity for animation time `t`
    pub fn advance(&mut self, t: f32) {
        self.position = self.original_position + self.motion.orbit_offset(t);
        // Accumulates without wrapping
        self.rotation += self.motion.rotation_speed * ROTATION_STEP;

        let pulse = self.motion.pulse(t);
        self.scale = self.motion.base_scale * (1.0 + pulse * PULSE_SCALE);
        self.opacity = self.motion.opacity(pulse);
    }
}

/// GPU instance data for an instanced glyph draw.
/// 48 bytes, 16-byte rows (3 x vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstanceGpu {
    /// Local position + scale packed into vec4
    pub pos_scale: [f32; 4], // xyz = position, w = scale
    /// Self-rotation + opacity
    pub rotation_opacity: [f32; 4], // xyz = euler rotation, w = opacity
    /// x = 1.0 for halo particles, yzw unused
    pub flags: [f32; 4],
}

impl ParticleInstanceGpu {
    pub fn from_instance(p: &ParticleInstance) -> Self {
        Self {
            pos_scale: [p.position.x, p.position.y, p.position.z, p.scale],
            rotation_opacity: [p.rotation.x, p.rotation.y, p.rotation.z, p.opacity],
            flags: [if p.is_glow() { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(is_glow: bool) -> MotionProfile {
        MotionProfile {
            phase_offset: 0.3,
            pulse_speed: 1.3,
            orbit_radius: 0.02,
            orbit_speed: 0.5,
            rotation_speed: Vec3::new(1.0, -0.5, 0.25),
            base_scale: 0.04,
            is_glow,
        }
    }

    #[test]
    fn opacity_bounds() {
        let core = profile(false);
        let halo = profile(true);
        assert!((core.opacity(1.0) - 0.90).abs() < 1e-6);
        assert!((core.opacity(-1.0) - 0.40).abs() < 1e-6);
        assert!((halo.opacity(1.0) - 0.25).abs() < 1e-6);
        assert!((halo.opacity(-1.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn sampled_profiles_stay_in_range() {
        let mut rng = ParticleRng::new(11);
        for _ in 0..500 {
            let c = MotionProfile::core(&mut rng, 1.0);
            assert!(!c.is_glow);
            assert!((0.005..=0.03).contains(&c.orbit_radius));
            assert!((0.5..=2.0).contains(&c.pulse_speed));
            assert!((0.6..=1.0).contains(&c.base_scale));
            assert!(c.rotation_speed.abs().max_element() <= 1.0);

            let h = MotionProfile::halo(&mut rng, 1.0);
            assert!(h.is_glow);
            assert!((0.02..=0.08).contains(&h.orbit_radius));
            assert!((0.3..=0.6).contains(&h.base_scale));
        }
    }

    #[test]
    fn advance_never_moves_origin() {
        let origin = Vec3::new(1.0, -2.0, 0.5);
        let mut p = ParticleInstance::new(origin, profile(false));
        for frame in 0..1000 {
            p.advance(frame as f32 / 60.0);
            let offset = p.position - origin;
            assert!(offset.x.abs() <= 0.02 + 1e-6);
            assert!(offset.y.abs() <= 0.02 + 1e-6);
            assert!(offset.z.abs() <= 0.01 + 1e-6);
        }
        assert_eq!(p.original_position(), origin);
    }

    #[test]
    fn rotation_accumulates_per_tick() {
        let mut p = ParticleInstance::new(Vec3::ZERO, profile(false));
        for _ in 0..10 {
            p.advance(0.0);
        }
        let expected = Vec3::new(1.0, -0.5, 0.25) * ROTATION_STEP * 10.0;
        assert!((p.rotation - expected).length() < 1e-6);
    }

    #[test]
    fn scale_pulses_around_base() {
        let mut p = ParticleInstance::new(Vec3::ZERO, profile(false));
        for frame in 0..600 {
            p.advance(frame as f32 * 0.05);
            assert!(p.scale >= 0.04 * 0.85 - 1e-6 && p.scale <= 0.04 * 1.15 + 1e-6);
        }
    }

    #[test]
    fn gpu_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstanceGpu>(), 48);
        assert_eq!(std::mem::align_of::<ParticleInstanceGpu>(), 4);
    }

    #[test]
    fn gpu_instance_flags_glow() {
        let halo = ParticleInstance::new(Vec3::ONE, profile(true));
        let gpu = ParticleInstanceGpu::from_instance(&halo);
        assert_eq!(gpu.flags[0], 1.0);
        assert_eq!(gpu.pos_scale, [1.0, 1.0, 1.0, 0.04]);
    }
}
