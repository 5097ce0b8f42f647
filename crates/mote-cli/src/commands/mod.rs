//! CLI command implementations

pub mod bake;
pub mod preview;
pub mod simulate;

use anyhow::{Context, Result};
use mote_core::MoteConfig;
use std::path::Path;

/// Load the explicit config file if one was given, otherwise the layered config
pub fn load_config(path: Option<&Path>) -> Result<MoteConfig> {
    match path {
        Some(path) => MoteConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => MoteConfig::load().context("Failed to load config"),
    }
}
