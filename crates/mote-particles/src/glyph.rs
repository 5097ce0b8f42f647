//! Stroke glyphs described as straight segments in local units
//!
//! Local units span roughly [-1, 1] on both axes with +y up.

use glam::Vec2;

/// A straight stroke between two endpoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            start: Vec2::new(x0, y0),
            end: Vec2::new(x1, y1),
        }
    }

    /// Point at parameter `t` in [0, 1]
    pub fn at(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t)
    }
}

/// A letterform made of segments
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub segments: Vec<Segment>,
}

impl Glyph {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The logo letter "D": a vertical stem closed by a faceted bowl
    pub fn letter_d() -> Self {
        Self::new(vec![
            // Stem
            Segment::new(-0.6, 1.0, -0.6, -1.0),
            // Bowl, top to bottom
            Segment::new(-0.6, 1.0, 0.1, 1.0),
            Segment::new(0.1, 1.0, 0.55, 0.7),
            Segment::new(0.55, 0.7, 0.7, 0.0),
            Segment::new(0.7, 0.0, 0.55, -0.7),
            Segment::new(0.55, -0.7, 0.1, -1.0),
            Segment::new(0.1, -1.0, -0.6, -1.0),
        ])
    }

    /// Axis-aligned bounds of all endpoints as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.segments.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), s| (lo.min(s.start).min(s.end), hi.max(s.start).max(s.end)),
        )
    }
}
