//! Per-frame animation of the particle field
//!
//! `update` is a pure step over explicit state: it advances the shared time
//! base, derives the group orientation from time and input, and recomputes
//! every particle. `AnimationController` wraps it with the instance buffer and
//! the frame sink so a host scheduler can tick it as a `RuntimeSystem`.

use crate::draw::{pack_instances, FrameSink, ParticleDrawData};
use crate::field::ParticleField;
use crate::particle::ParticleInstanceGpu;
use glam::{EulerRot, Quat};
use mote_core::Result;
use mote_runtime::{FrameClock, InputState, RuntimeSystem, Viewport};
use serde::Serialize;
use std::fmt;

/// Everything the frame step reads besides the field itself
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerState {
    /// Seconds since the field was mounted
    pub time: f64,
    /// Pointer offset in [-1, 1] per axis
    pub pointer: [f32; 2],
    pub scroll_progress: f32,
    pub viewport: Viewport,
    pub frame: u64,
}

impl ControllerState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            time: 0.0,
            pointer: [0.0, 0.0],
            scroll_progress: 0.0,
            viewport,
            frame: 0,
        }
    }

    /// Copy the latest input signals into the state
    pub fn apply_input(&mut self, input: &InputState) {
        self.pointer = input.pointer;
        self.scroll_progress = input.scroll_progress;
        self.viewport = input.viewport;
    }
}

/// Whole-field rotation in radians
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GroupOrientation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl GroupOrientation {
    /// Slow idle sway plus pointer and scroll response
    pub fn compute(t: f32, pointer: [f32; 2], scroll_progress: f32) -> Self {
        Self {
            yaw: (t * 0.1).sin() * 0.12 + pointer[0] * 0.25 + scroll_progress * 0.2,
            pitch: (t * 0.08).cos() * 0.08 + pointer[1] * 0.15,
            roll: (t * 0.05).sin() * 0.02,
        }
    }

    /// Rotation applied to the group: pitch about x, yaw about y, roll about z
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }
}

/// Summary of one finished frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameResult {
    pub frame: u64,
    pub time: f64,
    pub orientation: GroupOrientation,
    pub aspect: f32,
    pub particle_count: usize,
}

/// Advance `state` by `dt` seconds and recompute every particle in `field`
pub fn update(state: &mut ControllerState, field: &mut ParticleField, dt: f64) -> FrameResult {
    state.time += dt.max(0.0);
    state.frame += 1;

    let t = state.time as f32;
    let orientation = GroupOrientation::compute(t, state.pointer, state.scroll_progress);
    field.advance(t);

    FrameResult {
        frame: state.frame,
        time: state.time,
        orientation,
        aspect: state.viewport.aspect_ratio(),
        particle_count: field.len(),
    }
}

/// Owns a mounted field and drives it once per frame
pub struct AnimationController {
    state: ControllerState,
    field: ParticleField,
    clock: FrameClock,
    instance_buffer: Vec<ParticleInstanceGpu>,
    sink: Option<Box<dyn FrameSink>>,
    last_frame: Option<FrameResult>,
}

impl fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationController")
            .field("state", &self.state)
            .field("particles", &self.field.len())
            .field("max_delta", &self.clock.max_delta)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl AnimationController {
    pub fn new(field: ParticleField, viewport: Viewport) -> Self {
        Self {
            state: ControllerState::new(viewport),
            instance_buffer: Vec::with_capacity(field.len()),
            field,
            clock: FrameClock::new(),
            sink: None,
            last_frame: None,
        }
    }

    /// Attach the renderer that receives each frame
    pub fn with_sink(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the time source, e.g. to apply a configured delta cap
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn instances(&self) -> &[ParticleInstanceGpu] {
        &self.instance_buffer
    }

    pub fn last_frame(&self) -> Option<&FrameResult> {
        self.last_frame.as_ref()
    }

    /// Run one frame timed by the wall clock. Call once per scheduler tick.
    pub fn frame(&mut self, input: &InputState) -> Result<&FrameResult> {
        let dt = self.clock.tick();
        self.step(input, dt)
    }

    /// Run one frame `elapsed` seconds after the previous one. The clock caps
    /// the step at its `max_delta`.
    pub fn tick(&mut self, input: &InputState, elapsed: f64) -> Result<&FrameResult> {
        let dt = self.clock.advance(elapsed);
        self.step(input, dt)
    }

    /// Read input, step the field, pack and present
    fn step(&mut self, input: &InputState, dt: f64) -> Result<&FrameResult> {
        self.state.apply_input(input);
        let result = update(&mut self.state, &mut self.field, dt);
        pack_instances(&self.field, &mut self.instance_buffer);

        if let Some(sink) = self.sink.as_mut() {
            sink.present(&ParticleDrawData {
                frame: &result,
                instances: &self.instance_buffer,
            })?;
        }

        Ok(&*self.last_frame.insert(result))
    }
}

impl RuntimeSystem for AnimationController {
    fn initialize(&mut self) -> Result<()> {
        pack_instances(&self.field, &mut self.instance_buffer);
        log::info!(
            "Particle field ready: {} particles ({} halo)",
            self.field.len(),
            self.field.halo_count()
        );
        Ok(())
    }

    fn update(&mut self, input: &InputState, dt: f64) -> Result<()> {
        self.tick(input, dt).map(|_| ())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::debug!("Particle field stopped after {} frames", self.state.frame);
        self.sink = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
