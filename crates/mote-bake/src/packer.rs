//! Data texture packing
//!
//! Sampled particles are laid out row-major into three square textures:
//! RGB colour, 8-bit scale, and RGB-encoded normalized position. Texels past
//! the last particle are `TextureSlot::Empty` and encode to all zeros in every
//! texture. Because sampled x/y never leave [0.1, 0.9], a position texel of
//! exactly (0, 0, 0) always means "no particle here"; shader consumers may rely
//! on that.

use crate::sampler::SampledParticle;
use image::{GrayImage, Luma, Rgb, RgbImage};
use mote_core::{MoteError, Result};
use std::path::{Path, PathBuf};

/// Output file for the colour texture
pub const COLOR_TEXTURE_FILE: &str = "cd-33-logo.png";
/// Output file for the scale texture
pub const SCALE_TEXTURE_FILE: &str = "sc-33-logo.png";
/// Output file for the position texture
pub const POSITION_TEXTURE_FILE: &str = "pos-33-logo.png";

/// One texel of the packed layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureSlot {
    Occupied(SampledParticle),
    Empty,
}

/// Per-texture channel values for one slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedTexel {
    pub color: [u8; 3],
    pub scale: u8,
    pub position: [u8; 3],
}

impl EncodedTexel {
    pub const EMPTY: Self = Self {
        color: [0; 3],
        scale: 0,
        position: [0; 3],
    };
}

impl TextureSlot {
    pub fn is_occupied(&self) -> bool {
        matches!(self, TextureSlot::Occupied(_))
    }

    /// Quantize the slot into 8-bit channel values (floor of value * 255)
    pub fn encode(&self) -> EncodedTexel {
        match self {
            TextureSlot::Occupied(p) => EncodedTexel {
                color: p.color,
                scale: quantize(p.scale),
                position: [
                    quantize(p.position[0]),
                    quantize(p.position[1]),
                    quantize(p.position[2]),
                ],
            },
            TextureSlot::Empty => EncodedTexel::EMPTY,
        }
    }
}

/// Whether a position texel read back from disk holds a particle
pub fn is_occupied_texel(position: [u8; 3]) -> bool {
    position != [0, 0, 0]
}

fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// The three textures plus the slot layout they were encoded from
pub struct PackedTextures {
    pub dimension: u32,
    pub color: RgbImage,
    pub scale: GrayImage,
    pub position: RgbImage,
    slots: Vec<TextureSlot>,
}

impl PackedTextures {
    /// Slot at row-major index `i`
    pub fn slot(&self, i: usize) -> Option<&TextureSlot> {
        self.slots.get(i)
    }

    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Write the three PNGs into `dir`, creating it if needed.
    /// Returns paths in colour, scale, position order.
    pub fn write_to(&self, dir: &Path) -> Result<[PathBuf; 3]> {
        std::fs::create_dir_all(dir)?;

        let color_path = dir.join(COLOR_TEXTURE_FILE);
        self.color.save(&color_path)?;
        log::info!("Saved color texture: {}", color_path.display());

        let scale_path = dir.join(SCALE_TEXTURE_FILE);
        self.scale.save(&scale_path)?;
        log::info!("Saved scale texture: {}", scale_path.display());

        let position_path = dir.join(POSITION_TEXTURE_FILE);
        self.position.save(&position_path)?;
        log::info!("Saved position texture: {}", position_path.display());

        Ok([color_path, scale_path, position_path])
    }
}

/// Packs sampled particles into fixed-size square data textures
pub struct TexturePacker {
    dimension: u32,
}

impl TexturePacker {
    pub fn new(dimension: u32) -> Result<Self> {
        if dimension == 0 {
            return Err(MoteError::InvalidConfig("texture dimension must be > 0".into()));
        }
        Ok(Self { dimension })
    }

    /// Number of texels, i.e. the most particles one pack can hold
    pub fn capacity(&self) -> usize {
        self.dimension as usize * self.dimension as usize
    }

    /// Lay out `particles` row-major and encode them
    pub fn pack(&self, particles: &[SampledParticle]) -> Result<PackedTextures> {
        let capacity = self.capacity();
        if particles.len() > capacity {
            return Err(MoteError::TextureOverflow {
                count: particles.len(),
                dimension: self.dimension,
            });
        }

        let slots: Vec<TextureSlot> = (0..capacity)
            .map(|i| match particles.get(i) {
                Some(p) => TextureSlot::Occupied(*p),
                None => TextureSlot::Empty,
            })
            .collect();

        let d = self.dimension;
        let mut color = RgbImage::new(d, d);
        let mut scale = GrayImage::new(d, d);
        let mut position = RgbImage::new(d, d);

        for (i, slot) in slots.iter().enumerate() {
            let x = (i % d as usize) as u32;
            let y = (i / d as usize) as u32;
            let texel = slot.encode();
            color.put_pixel(x, y, Rgb(texel.color));
            scale.put_pixel(x, y, Luma([texel.scale]));
            position.put_pixel(x, y, Rgb(texel.position));
        }

        log::debug!(
            "Packed {} particles into {}x{} textures ({} empty slots)",
            particles.len(),
            d,
            d,
            capacity - particles.len()
        );

        Ok(PackedTextures {
            dimension: d,
            color,
            scale,
            position,
            slots,
        })
    }
}
