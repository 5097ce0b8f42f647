//! Mote Bake - offline logo-to-data-texture pipeline
//!
//! Turns a logo image into three data textures for a shader-driven particle
//! renderer:
//! - `ImageSampler`: letterbox + stochastic brightness/alpha sampling
//! - `TexturePacker`: row-major packing into colour, scale and position PNGs
//!
//! The pipeline is single-threaded and runs to completion; any failure is
//! returned to the caller.

pub mod packer;
pub mod sampler;

use mote_core::{BakeConfig, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

pub use packer::{
    is_occupied_texel, EncodedTexel, PackedTextures, TexturePacker, TextureSlot,
    COLOR_TEXTURE_FILE, POSITION_TEXTURE_FILE, SCALE_TEXTURE_FILE,
};
pub use sampler::{ImageSampler, SampledParticle, SamplerConfig, SamplingStats};

/// Summary of one bake run
#[derive(Debug, Clone, Serialize)]
pub struct BakeReport {
    pub input: PathBuf,
    pub particle_count: usize,
    pub texture_size: u32,
    pub stats: SamplingStats,
    pub outputs: Vec<PathBuf>,
}

/// Load the configured logo, sample it, and write the three textures
pub fn bake(config: &BakeConfig, seed: u64) -> Result<BakeReport> {
    log::info!(
        "Baking {} into {}x{} data textures",
        config.input.display(),
        config.texture_size,
        config.texture_size
    );

    let sampler = ImageSampler::new(SamplerConfig::from(config))?;
    let packer = TexturePacker::new(config.texture_size)?;

    let image = image::open(&config.input)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let (particles, stats) = sampler.sample(&image, &mut rng);

    let packed = packer.pack(&particles)?;
    let outputs = packed.write_to(&config.output_dir)?;

    Ok(BakeReport {
        input: config.input.clone(),
        particle_count: particles.len(),
        texture_size: packed.dimension,
        stats,
        outputs: outputs.to_vec(),
    })
}
