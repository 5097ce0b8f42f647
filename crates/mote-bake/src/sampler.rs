//! Stochastic logo sampling
//!
//! The source image is letterboxed into a square RGBA canvas, then sampled at
//! random pixels. Pixels that are opaque enough and neither near-black nor
//! near-white become weighted particle records in normalized space.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use mote_core::{BakeConfig, MoteError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Brightness must be strictly above this to be sampled
pub const MIN_BRIGHTNESS: f32 = 25.0;
/// Brightness must be strictly below this to be sampled
pub const MAX_BRIGHTNESS: f32 = 250.0;
/// Alpha must be strictly above this to be sampled
pub const MIN_ALPHA: u8 = 200;

/// Normalized coordinates are squeezed into [PADDING, 1 - PADDING]
pub const PADDING: f32 = 0.1;

/// One accepted pixel, in normalized [0, 1] space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SampledParticle {
    pub position: [f32; 3],
    pub color: [u8; 3],
    pub scale: f32,
}

/// Sampling limits
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerConfig {
    pub canvas_size: u32,
    pub target_count: usize,
    pub max_attempts: usize,
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            return Err(MoteError::InvalidConfig("canvas size must be > 0".into()));
        }
        if self.target_count == 0 {
            return Err(MoteError::InvalidConfig("target count must be > 0".into()));
        }
        if self.max_attempts <= self.target_count {
            return Err(MoteError::InvalidConfig(format!(
                "attempt budget {} must exceed target count {}",
                self.max_attempts, self.target_count
            )));
        }
        Ok(())
    }
}

impl From<&BakeConfig> for SamplerConfig {
    fn from(config: &BakeConfig) -> Self {
        Self {
            canvas_size: config.canvas_size,
            target_count: config.target_count,
            max_attempts: config.max_attempts,
        }
    }
}

/// Counters describing one sampling run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SamplingStats {
    pub attempts: usize,
    pub accepted: usize,
    pub rejected_alpha: usize,
    pub rejected_brightness: usize,
}

/// Why a pixel was turned away
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Alpha,
    Brightness,
}

/// Mean of the colour channels, 0..=255
pub fn brightness(pixel: Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    (r as f32 + g as f32 + b as f32) / 3.0
}

/// Apply the alpha and brightness thresholds; returns the brightness on acceptance
pub fn classify(pixel: Rgba<u8>) -> std::result::Result<f32, Rejection> {
    if pixel.0[3] <= MIN_ALPHA {
        return Err(Rejection::Alpha);
    }
    let b = brightness(pixel);
    if b <= MIN_BRIGHTNESS || b >= MAX_BRIGHTNESS {
        return Err(Rejection::Brightness);
    }
    Ok(b)
}

/// Fit `image` inside a `size`x`size` transparent canvas, preserving aspect ratio
pub fn letterbox(image: &DynamicImage, size: u32) -> RgbaImage {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut canvas = RgbaImage::new(size, size);
    if w == 0 || h == 0 {
        return canvas;
    }

    let fit = size as f32 / w.max(h) as f32;
    let fit_w = ((w as f32 * fit).round() as u32).clamp(1, size);
    let fit_h = ((h as f32 * fit).round() as u32).clamp(1, size);

    let resized = if (fit_w, fit_h) == (w, h) {
        rgba
    } else {
        imageops::resize(&rgba, fit_w, fit_h, FilterType::Lanczos3)
    };

    let x = (size - fit_w) / 2;
    let y = (size - fit_h) / 2;
    // `replace` copies texels verbatim; `overlay` would alpha-blend into the padding
    imageops::replace(&mut canvas, &resized, x as i64, y as i64);
    canvas
}

/// Samples a logo image into particle records
pub struct ImageSampler {
    config: SamplerConfig,
}

impl ImageSampler {
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Letterbox `image` into the working canvas and sample it
    pub fn sample<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> (Vec<SampledParticle>, SamplingStats) {
        log::debug!(
            "Letterboxing {}x{} source into {}x{} canvas",
            image.width(),
            image.height(),
            self.config.canvas_size,
            self.config.canvas_size
        );
        let canvas = letterbox(image, self.config.canvas_size);
        self.sample_canvas(&canvas, rng)
    }

    /// Sample an already-prepared canvas.
    ///
    /// Stops after `target_count` acceptances or `max_attempts` draws,
    /// whichever comes first, then shuffles so any prefix is spatially
    /// representative.
    pub fn sample_canvas<R: Rng + ?Sized>(
        &self,
        canvas: &RgbaImage,
        rng: &mut R,
    ) -> (Vec<SampledParticle>, SamplingStats) {
        let (mut accepted, mut stats) = self.draw_samples(canvas, rng);

        // Fisher-Yates; acceptance order follows the draw sequence
        accepted.shuffle(rng);
        stats.accepted = accepted.len();

        if accepted.len() < self.config.target_count {
            log::warn!(
                "Only {} of {} target particles accepted within {} attempts",
                accepted.len(),
                self.config.target_count,
                self.config.max_attempts
            );
        }
        log::info!(
            "Sampled {} particles in {} attempts ({} alpha / {} brightness rejections)",
            stats.accepted,
            stats.attempts,
            stats.rejected_alpha,
            stats.rejected_brightness
        );

        (accepted, stats)
    }

    /// Random draws until the target or the attempt budget is reached, in
    /// acceptance order
    fn draw_samples<R: Rng + ?Sized>(
        &self,
        canvas: &RgbaImage,
        rng: &mut R,
    ) -> (Vec<SampledParticle>, SamplingStats) {
        let (width, height) = canvas.dimensions();
        let mut stats = SamplingStats::default();
        let mut accepted = Vec::with_capacity(self.config.target_count);

        if width == 0 || height == 0 {
            return (accepted, stats);
        }

        while stats.attempts < self.config.max_attempts && accepted.len() < self.config.target_count
        {
            stats.attempts += 1;

            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            let pixel = *canvas.get_pixel(x, y);

            let b = match classify(pixel) {
                Ok(b) => b,
                Err(Rejection::Alpha) => {
                    stats.rejected_alpha += 1;
                    continue;
                }
                Err(Rejection::Brightness) => {
                    stats.rejected_brightness += 1;
                    continue;
                }
            };

            // Image rows grow downward, scene +y points up
            let nx = x as f32 / width as f32;
            let ny = 1.0 - y as f32 / height as f32;
            let jitter = rng.random::<f32>() - 0.5;

            accepted.push(SampledParticle {
                position: [
                    pad(nx),
                    pad(ny),
                    0.5 + (b / 255.0) * 0.1 + jitter * 0.05,
                ],
                color: [pixel.0[0], pixel.0[1], pixel.0[2]],
                scale: (b / 255.0).max(0.2),
            });
        }

        stats.accepted = accepted.len();
        (accepted, stats)
    }
}

/// Remap [0, 1] into [PADDING, 1 - PADDING]
fn pad(v: f32) -> f32 {
    // f32 rounding can land 1.0 one ulp past the upper margin
    (v * (1.0 - 2.0 * PADDING) + PADDING).clamp(PADDING, 1.0 - PADDING)
}
