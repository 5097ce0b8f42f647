//! Runtime system trait

use crate::input::InputState;
use mote_core::Result;

/// A system that can be ticked by the host's frame scheduler
///
/// The scheduler calls `update` once per animation frame and waits for it to
/// return before scheduling the next one, so implementations must not block
/// or perform I/O inside `update`.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with the latest input signals
    fn update(&mut self, input: &InputState, dt: f64) -> Result<()>;

    /// Called when the host tears the system down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
