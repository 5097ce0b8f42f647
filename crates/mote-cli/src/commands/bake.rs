//! Offline texture bake command

use anyhow::{Context, Result};
use mote_core::MoteConfig;

pub fn run(config: &MoteConfig) -> Result<()> {
    let report = mote_bake::bake(&config.bake, config.seed).with_context(|| {
        format!("Failed to bake textures from {}", config.bake.input.display())
    })?;

    println!("Input: {}", report.input.display());
    println!(
        "Sampled {} particles in {} attempts ({} rejected by alpha, {} by brightness)",
        report.particle_count,
        report.stats.attempts,
        report.stats.rejected_alpha,
        report.stats.rejected_brightness
    );
    println!("Texture size: {0}x{0}", report.texture_size);
    for path in &report.outputs {
        println!("  Wrote {}", path.display());
    }
    Ok(())
}
