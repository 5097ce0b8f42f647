//! Mote Core - Foundational types shared by the Mote crates
//!
//! This crate provides:
//! - `MoteError` and the `Result` alias
//! - `MoteConfig` - layered TOML configuration for the bake and runtime pipelines

mod config;
mod error;

pub use config::{BakeConfig, FieldConfig, MoteConfig, RuntimeConfig};
pub use error::{MoteError, Result};
