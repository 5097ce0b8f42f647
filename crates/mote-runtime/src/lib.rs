//! Mote Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the particle field is driven by:
//! - `FrameClock` - wall-clock derived frame deltas
//! - `InputState` - pointer, scroll and viewport signals
//! - `Host` / `wait_for_renderer` - container lookup and bounded readiness polling
//! - `RuntimeSystem` - trait for systems ticked by the host's frame scheduler

mod clock;
mod host;
mod input;
mod system;

pub use clock::FrameClock;
pub use host::{wait_for_renderer, Host, RetryPolicy};
pub use input::{scroll_progress, ContainerRect, InputState, Viewport};
pub use system::RuntimeSystem;
