//! Layered configuration system
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `MOTE_SEED`
//! 2. Project-local: `mote.toml`
//! 3. Global: `~/.mote/config.toml`
//! 4. Built-in defaults
//!
//! Layers are merged as TOML tables before deserializing, so a file only
//! needs to mention the keys it overrides.

use crate::{MoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Offline texture bake settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Source logo image
    pub input: PathBuf,
    /// Directory receiving the three data textures
    pub output_dir: PathBuf,
    /// Side of the square working canvas the source is letterboxed into
    pub canvas_size: u32,
    /// Upper bound on accepted samples
    pub target_count: usize,
    /// Upper bound on random pixel draws
    pub max_attempts: usize,
    /// Side of the square output textures
    pub texture_size: u32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("assets/logo.png"),
            output_dir: PathBuf::from("assets/images"),
            canvas_size: 512,
            target_count: 16_384,
            max_attempts: 200_000,
            texture_size: 128,
        }
    }
}

/// Runtime particle field settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Scale applied to the letter glyph's local units
    pub glyph_scale: f32,
    /// Radius of the outer ring around the letter
    pub ring_radius: f32,
    /// Points per ring layer
    pub ring_count: usize,
    /// Number of free-floating halo particles
    pub halo_count: usize,
    pub halo_inner_radius: f32,
    pub halo_outer_radius: f32,
    /// World-space size of one particle glyph at base scale 1.0
    pub glyph_size: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            glyph_scale: 1.0,
            ring_radius: 2.0,
            ring_count: 160,
            halo_count: 150,
            halo_inner_radius: 2.4,
            halo_outer_radius: 3.2,
            glyph_size: 0.035,
        }
    }
}

/// Host integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Identifier of the container element the field mounts into
    pub container_id: String,
    /// How many times to check for the renderer before giving up
    pub retry_attempts: u32,
    /// Delay between renderer checks
    pub retry_delay_ms: u64,
    /// Largest frame delta fed to the animation, in seconds
    pub max_frame_delta: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            container_id: "logo-particles".to_string(),
            retry_attempts: 50,
            retry_delay_ms: 100,
            max_frame_delta: 0.25,
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoteConfig {
    /// Seed for every random stream (sampling, jitter, motion profiles)
    pub seed: u64,
    pub bake: BakeConfig,
    pub field: FieldConfig,
    pub runtime: RuntimeConfig,
}

impl Default for MoteConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_1065,
            bake: BakeConfig::default(),
            field: FieldConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl MoteConfig {
    /// Load config with layered precedence: defaults < global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = toml::Table::new();

        // Layer 1: Global config (~/.mote/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::merge_into(&mut merged, Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (mote.toml)
        let local_path = PathBuf::from("mote.toml");
        if local_path.exists() {
            Self::merge_into(&mut merged, Self::load_file(&local_path)?);
        }

        Self::finish(merged)
    }

    /// Load config from a specific file path only (defaults still apply)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let table = Self::load_file(path)?;
        Self::finish(table)
    }

    /// Check that every setting is usable by the bake and runtime pipelines
    pub fn validate(&self) -> Result<()> {
        let bake = &self.bake;
        if bake.canvas_size == 0 {
            return Err(MoteError::InvalidConfig("bake.canvas_size must be > 0".into()));
        }
        if bake.target_count == 0 {
            return Err(MoteError::InvalidConfig("bake.target_count must be > 0".into()));
        }
        if bake.max_attempts <= bake.target_count {
            return Err(MoteError::InvalidConfig(format!(
                "bake.max_attempts ({}) must exceed bake.target_count ({})",
                bake.max_attempts, bake.target_count
            )));
        }
        let texels = bake.texture_size as usize * bake.texture_size as usize;
        if texels < bake.target_count {
            return Err(MoteError::InvalidConfig(format!(
                "bake.texture_size {0}x{0} holds {1} texels, fewer than target_count {2}",
                bake.texture_size, texels, bake.target_count
            )));
        }

        let field = &self.field;
        if field.glyph_scale <= 0.0 {
            return Err(out_of_range("field.glyph_scale", 0.0, f64::MAX, field.glyph_scale));
        }
        if field.glyph_size <= 0.0 {
            return Err(out_of_range("field.glyph_size", 0.0, f64::MAX, field.glyph_size));
        }
        if field.halo_inner_radius < 0.0 || field.halo_outer_radius < field.halo_inner_radius {
            return Err(MoteError::InvalidConfig(format!(
                "field halo radii must satisfy 0 <= inner ({}) <= outer ({})",
                field.halo_inner_radius, field.halo_outer_radius
            )));
        }

        if self.runtime.retry_attempts == 0 {
            return Err(MoteError::InvalidConfig("runtime.retry_attempts must be > 0".into()));
        }
        if self.runtime.max_frame_delta <= 0.0 {
            return Err(out_of_range(
                "runtime.max_frame_delta",
                0.0,
                f64::MAX,
                self.runtime.max_frame_delta as f32,
            ));
        }
        Ok(())
    }

    fn finish(table: toml::Table) -> Result<Self> {
        let mut config: MoteConfig = toml::Value::Table(table).try_into()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mote").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| {
            MoteError::TomlParseError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(table)
    }

    /// Recursively overlay `overlay` onto `base`; sub-tables merge, scalars replace
    fn merge_into(base: &mut toml::Table, overlay: toml::Table) {
        for (key, value) in overlay {
            match (base.get_mut(&key), value) {
                (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                    Self::merge_into(existing, incoming);
                }
                (_, value) => {
                    base.insert(key, value);
                }
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("MOTE_SEED") {
            if let Some(seed) = parse_seed(&raw) {
                self.seed = seed;
            }
        }
    }
}

/// Parse a seed override; anything but an unsigned 64-bit integer is ignored
fn parse_seed(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            log::warn!("Ignoring MOTE_SEED={raw:?}: not an unsigned 64-bit integer");
            None
        }
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f32) -> MoteError {
    MoteError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value: value as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mote_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = MoteConfig::default();
        config.validate().unwrap();
        assert!(config.bake.max_attempts > config.bake.target_count);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_config(
            r#"
[bake]
target_count = 1000
texture_size = 32

[field]
halo_count = 12
"#,
        );
        let config = MoteConfig::load_from_file(&path).unwrap();
        assert_eq!(config.bake.target_count, 1000);
        assert_eq!(config.bake.texture_size, 32);
        assert_eq!(config.bake.canvas_size, BakeConfig::default().canvas_size);
        assert_eq!(config.field.halo_count, 12);
        assert_eq!(config.runtime, RuntimeConfig::default());
        cleanup(&path);
    }

    #[test]
    fn test_texture_too_small_rejected() {
        let path = temp_config(
            r#"
[bake]
target_count = 5000
texture_size = 64
"#,
        );
        let err = MoteConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, MoteError::InvalidConfig(_)));
        cleanup(&path);
    }

    #[test]
    fn test_attempt_budget_must_exceed_target() {
        let mut config = MoteConfig::default();
        config.bake.max_attempts = config.bake.target_count;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_config("[bake\ntarget_count = ");
        let err = MoteConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, MoteError::TomlParseError(_)));
        cleanup(&path);
    }

    #[test]
    fn test_merge_overlays_nested_tables() {
        let mut base: toml::Table = toml::from_str(
            r#"
seed = 1
[bake]
canvas_size = 256
texture_size = 200
"#,
        )
        .unwrap();
        let overlay: toml::Table = toml::from_str(
            r#"
[bake]
texture_size = 150
"#,
        )
        .unwrap();
        MoteConfig::merge_into(&mut base, overlay);
        let bake = base["bake"].as_table().unwrap();
        assert_eq!(bake["canvas_size"].as_integer(), Some(256));
        assert_eq!(bake["texture_size"].as_integer(), Some(150));
        assert_eq!(base["seed"].as_integer(), Some(1));
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed(" 42 "), Some(42));
        assert_eq!(parse_seed("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_seed("-1"), None);
        assert_eq!(parse_seed("0x10"), None);
        assert_eq!(parse_seed(""), None);
    }

    // Single test touching MOTE_SEED so parallel tests never race on it
    #[test]
    fn test_env_seed_override() {
        let path = temp_config("seed = 7\n");

        std::env::set_var("MOTE_SEED", "99");
        let overridden = MoteConfig::load_from_file(&path);

        std::env::set_var("MOTE_SEED", "-1");
        let negative = MoteConfig::load_from_file(&path);

        std::env::set_var("MOTE_SEED", u64::MAX.to_string());
        let largest = MoteConfig::load_from_file(&path);

        std::env::remove_var("MOTE_SEED");

        assert_eq!(overridden.unwrap().seed, 99);
        assert_eq!(negative.unwrap().seed, 7);
        assert_eq!(largest.unwrap().seed, u64::MAX);
        cleanup(&path);
    }
}
