//! Mote Particles - procedural logo particle field
//!
//! Provides the live half of the logo effect:
//! - Ring and glyph point generators with seeded jitter
//! - A fixed particle field with independent per-particle motion profiles
//! - A pure per-frame update driven by time, pointer and scroll
//! - GPU instance packing handed to an external renderer through `FrameSink`

pub mod controller;
pub mod draw;
pub mod field;
pub mod glyph;
pub mod mount;
pub mod particle;
pub mod points;
pub mod rand;

pub use controller::{update, AnimationController, ControllerState, FrameResult, GroupOrientation};
pub use draw::{pack_instances, FrameSink, ParticleDrawData};
pub use field::ParticleField;
pub use glyph::{Glyph, Segment};
pub use mount::{mount, mount_configured};
pub use particle::{MotionProfile, ParticleInstance, ParticleInstanceGpu};
pub use points::{letter, logo_points, ring, GeneratedPoint};
pub use rand::ParticleRng;
