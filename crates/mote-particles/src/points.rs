//! Procedural point sets for the logo shapes
//!
//! Every generator is deterministic apart from the jitter it draws from the
//! supplied `ParticleRng`. Output is append-only; ordering only groups points
//! by the shape that produced them.

use crate::glyph::Glyph;
use crate::rand::ParticleRng;
use glam::Vec3;
use mote_core::FieldConfig;
use std::f32::consts::TAU;

/// A generated point in shape-local model units
pub type GeneratedPoint = Vec3;

/// Points emitted per glyph segment, endpoints included
pub const GLYPH_SEGMENT_DENSITY: usize = 24;

/// Full width of the z jitter applied to ring and glyph points
pub const DEPTH_JITTER: f32 = 0.1;

/// Full width of the x/y perturbation of the glyph thickness pass, per unit scale
pub const THICKNESS_JITTER: f32 = 0.06;

/// `count` points evenly spaced by angle around a circle of `radius`
pub fn ring(radius: f32, count: usize, z_offset: f32, rng: &mut ParticleRng) -> Vec<GeneratedPoint> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            Vec3::new(
                angle.cos() * radius,
                angle.sin() * radius,
                z_offset + rng.jitter(DEPTH_JITTER),
            )
        })
        .collect()
}

/// Points along every segment of `glyph`, scaled by `scale`.
///
/// The first pass lays points exactly on the strokes; the second re-emits the
/// same strokes with a small x/y perturbation to thicken them.
pub fn letter(glyph: &Glyph, scale: f32, rng: &mut ParticleRng) -> Vec<GeneratedPoint> {
    let per_pass = glyph.segments.len() * GLYPH_SEGMENT_DENSITY;
    let mut points = Vec::with_capacity(per_pass * 2);

    for segment in &glyph.segments {
        for i in 0..GLYPH_SEGMENT_DENSITY {
            let p = segment.at(stroke_t(i)) * scale;
            points.push(Vec3::new(p.x, p.y, rng.jitter(DEPTH_JITTER)));
        }
    }

    let spread = THICKNESS_JITTER * scale;
    for segment in &glyph.segments {
        for i in 0..GLYPH_SEGMENT_DENSITY {
            let p = segment.at(stroke_t(i)) * scale;
            points.push(Vec3::new(
                p.x + rng.jitter(spread),
                p.y + rng.jitter(spread),
                rng.jitter(DEPTH_JITTER),
            ));
        }
    }

    points
}

fn stroke_t(i: usize) -> f32 {
    i as f32 / (GLYPH_SEGMENT_DENSITY - 1) as f32
}

/// The full logo: a layered outer ring around the letter
pub fn logo_points(config: &FieldConfig, rng: &mut ParticleRng) -> Vec<GeneratedPoint> {
    let r = config.ring_radius;
    let n = config.ring_count;
    let sparse = n - n / 10;
    let dense = n + n / 10;

    let mut points = Vec::new();
    // Three slightly offset rings read as one thick stroke
    points.extend(ring(r, n, 0.0, rng));
    points.extend(ring(r * 1.02, dense, 0.02, rng));
    points.extend(ring(r * 0.98, sparse, -0.02, rng));
    points.extend(letter(&Glyph::letter_d(), config.glyph_scale, rng));

    log::debug!(
        "Generated {} logo points ({} ring, {} letter)",
        points.len(),
        n + dense + sparse,
        points.len() - (n + dense + sparse)
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn ring_of_four_hits_cardinal_angles() {
        let mut rng = ParticleRng::new(1);
        let pts = ring(1.0, 4, 0.0, &mut rng);
        assert_eq!(pts.len(), 4);
        let expected = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        for (p, (x, y)) in pts.iter().zip(expected) {
            assert!(close(p.x, x), "x {} != {}", p.x, x);
            assert!(close(p.y, y), "y {} != {}", p.y, y);
            assert!(p.z.abs() <= DEPTH_JITTER / 2.0);
        }
    }

    #[test]
    fn ring_spacing_is_identical_across_calls() {
        let mut rng = ParticleRng::new(2);
        let a = ring(1.5, 36, 0.3, &mut rng);
        let b = ring(1.5, 36, 0.3, &mut rng);
        let mut z_differs = false;
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
            z_differs |= p.z != q.z;
        }
        assert!(z_differs);
    }

    #[test]
    fn ring_z_offset_centres_jitter() {
        let mut rng = ParticleRng::new(3);
        for p in ring(2.0, 100, 0.5, &mut rng) {
            assert!((p.z - 0.5).abs() <= DEPTH_JITTER / 2.0 + 1e-6);
            assert!(close(p.truncate().length(), 2.0));
        }
    }

    #[test]
    fn empty_ring() {
        let mut rng = ParticleRng::new(4);
        assert!(ring(1.0, 0, 0.0, &mut rng).is_empty());
    }

    #[test]
    fn letter_emits_two_passes() {
        let glyph = Glyph::letter_d();
        let mut rng = ParticleRng::new(5);
        let scale = 2.0;
        let pts = letter(&glyph, scale, &mut rng);
        let per_pass = glyph.segments.len() * GLYPH_SEGMENT_DENSITY;
        assert_eq!(pts.len(), per_pass * 2);

        // First pass lies exactly on the scaled strokes
        let stem = glyph.segments[0];
        assert!(close(pts[0].x, stem.start.x * scale));
        assert!(close(pts[0].y, stem.start.y * scale));
        assert!(close(pts[GLYPH_SEGMENT_DENSITY - 1].y, stem.end.y * scale));

        // Second pass stays within the thickness band of its stroke point
        let band = THICKNESS_JITTER * scale / 2.0 + 1e-5;
        for (on, thick) in pts[..per_pass].iter().zip(&pts[per_pass..]) {
            assert!((on.x - thick.x).abs() <= band);
            assert!((on.y - thick.y).abs() <= band);
        }
    }

    #[test]
    fn logo_rings_are_three_layers() {
        let config = FieldConfig::default();
        let mut rng = ParticleRng::new(7);
        let pts = logo_points(&config, &mut rng);
        let n = config.ring_count;
        let r = config.ring_radius;
        let layers = [(n, r, 0.0), (n + n / 10, r * 1.02, 0.02), (n - n / 10, r * 0.98, -0.02)];

        let mut start = 0;
        for (count, radius, z) in layers {
            for p in &pts[start..start + count] {
                assert!((p.truncate().length() - radius).abs() < 1e-4);
                assert!((p.z - z).abs() <= DEPTH_JITTER / 2.0 + 1e-6);
            }
            start += count;
        }
    }

        #[test]
    fn logo_composition_count() {
        let config = FieldConfig::default();
        let mut rng = ParticleRng::new(6);
        let pts = logo_points(&config, &mut rng);
        let n = config.ring_count;
        let rings = n + (n + n / 10) + (n - n / 10);
        let letter = Glyph::letter_d().segments.len() * GLYPH_SEGMENT_DENSITY * 2;
        assert_eq!(pts.len(), rings + letter);
    }
}
