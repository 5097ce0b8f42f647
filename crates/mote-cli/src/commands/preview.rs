//! Headless one-frame preview as an orthographic point splat

use anyhow::{Context, Result};
use glam::Vec3;
use image::{Rgb, RgbImage};
use mote_core::MoteConfig;
use mote_particles::{AnimationController, FrameSink, ParticleDrawData, ParticleField};
use mote_runtime::{FrameClock, InputState, RuntimeSystem, Viewport};
use std::path::{Path, PathBuf};

const CORE_TINT: [f32; 3] = [1.0, 1.0, 1.0];
const HALO_TINT: [f32; 3] = [0.55, 0.75, 1.0];

/// Margin around the halo band so orbiting particles stay in frame
const FRAME_MARGIN: f32 = 1.1;

/// Frame sink that splats each particle as a soft additive disc and writes the
/// result to a PNG
pub struct SplatSink {
    output: PathBuf,
    size: u32,
    /// World-space half-width covered by the image
    extent: f32,
}

impl SplatSink {
    pub fn new(output: impl Into<PathBuf>, size: u32, extent: f32) -> Self {
        Self {
            output: output.into(),
            size,
            extent,
        }
    }

    fn rasterize(&self, data: &ParticleDrawData<'_>) -> RgbImage {
        let size = self.size.max(1);
        let half = size as f32 / 2.0;
        let px_per_unit = half / self.extent;
        let rotation = data.frame.orientation.to_quat();

        let mut accum = vec![[0.0f32; 3]; size as usize * size as usize];

        for instance in data.instances {
            let [x, y, z, scale] = instance.pos_scale;
            let opacity = instance.rotation_opacity[3];
            let tint = if instance.flags[0] > 0.5 { HALO_TINT } else { CORE_TINT };

            let p = rotation * Vec3::new(x, y, z);
            let cx = half + p.x * px_per_unit;
            let cy = half - p.y * px_per_unit;
            let radius = (scale * px_per_unit).max(1.0);

            let x0 = (cx - radius).floor().max(0.0) as u32;
            let y0 = (cy - radius).floor().max(0.0) as u32;
            let x1 = ((cx + radius).ceil() as i64).clamp(0, size as i64 - 1) as u32;
            let y1 = ((cy + radius).ceil() as i64).clamp(0, size as i64 - 1) as u32;

            for py in y0..=y1 {
                for px in x0..=x1 {
                    let dx = px as f32 + 0.5 - cx;
                    let dy = py as f32 + 0.5 - cy;
                    let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / radius;
                    if falloff <= 0.0 {
                        continue;
                    }
                    let texel = &mut accum[texel_index(px, py, size)];
                    for (channel, t) in texel.iter_mut().zip(tint) {
                        *channel += t * opacity * falloff;
                    }
                }
            }
        }

        RgbImage::from_fn(size, size, |x, y| {
            let texel = accum[texel_index(x, y, size)];
            Rgb(texel.map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8))
        })
    }
}

/// Row-major index of texel (x, y), computed in `usize` so large images do not wrap
fn texel_index(x: u32, y: u32, size: u32) -> usize {
    y as usize * size as usize + x as usize
}

impl FrameSink for SplatSink {
    fn present(&mut self, data: &ParticleDrawData<'_>) -> mote_core::Result<()> {
        let image = self.rasterize(data);
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        image.save(&self.output)?;
        log::debug!("Frame {} written to {}", data.frame.frame, self.output.display());
        Ok(())
    }
}

pub fn run(config: &MoteConfig, output: &Path, time: f64, size: u32) -> Result<()> {
    let extent = config.field.halo_outer_radius.max(config.field.ring_radius) * FRAME_MARGIN;
    let field = ParticleField::from_config(&config.field, config.seed);
    let count = field.len();

    let sink = SplatSink::new(output, size, extent);
    let time = time.max(0.0);
    // One step straight to the requested time, so the delta cap must admit it
    let mut controller = AnimationController::new(field, Viewport::new(size as f32, size as f32))
        .with_clock(FrameClock::with_max_delta(time))
        .with_sink(Box::new(sink));
    controller.initialize()?;
    controller
        .tick(&InputState::default(), time)
        .with_context(|| format!("Failed to render preview to {}", output.display()))?;
    controller.shutdown()?;

    println!("Rendered {} particles at t={:.2}s to {}", count, time, output.display());
    Ok(())
}
