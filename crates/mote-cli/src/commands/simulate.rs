//! Headless simulation command

use anyhow::{Context, Result};
use mote_core::MoteConfig;
use mote_particles::{AnimationController, GroupOrientation, ParticleField};
use mote_runtime::{FrameClock, InputState, RuntimeSystem, Viewport};
use serde::Serialize;

pub struct SimulateArgs {
    pub frames: u32,
    pub dt: f64,
    pub pointer: [f32; 2],
    pub scroll: f32,
}

/// Observed min/max of a value across a run
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    fn empty() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub frames: u64,
    pub time: f64,
    pub core_particles: usize,
    pub halo_particles: usize,
    pub final_orientation: GroupOrientation,
    /// Largest orbit offset seen, as a fraction of the particle's own orbit radius
    pub max_drift_ratio: f32,
    pub core_opacity: Range,
    pub halo_opacity: Range,
}

pub fn simulate(config: &MoteConfig, args: &SimulateArgs) -> Result<SimulationSummary> {
    let field = ParticleField::from_config(&config.field, config.seed);
    let mut controller = AnimationController::new(field, Viewport::default())
        .with_clock(FrameClock::with_max_delta(config.runtime.max_frame_delta));
    controller.initialize()?;

    let mut input = InputState::default();
    input.pointer = [args.pointer[0].clamp(-1.0, 1.0), args.pointer[1].clamp(-1.0, 1.0)];
    input.scroll_progress = args.scroll.clamp(0.0, 1.0);

    let mut max_drift_ratio = 0.0f32;
    let mut core_opacity = Range::empty();
    let mut halo_opacity = Range::empty();

    for _ in 0..args.frames {
        controller.tick(&input, args.dt)?;

        for p in controller.field().instances() {
            let offset = (p.position - p.original_position()).abs();
            let r = p.motion.orbit_radius;
            if r > 0.0 {
                let ratio = offset.x.max(offset.y).max(offset.z * 2.0) / r;
                max_drift_ratio = max_drift_ratio.max(ratio);
            }
            if p.is_glow() {
                halo_opacity.include(p.opacity);
            } else {
                core_opacity.include(p.opacity);
            }
        }
    }

    controller.shutdown()?;

    let field = controller.field();
    Ok(SimulationSummary {
        seed: config.seed,
        frames: controller.state().frame,
        time: controller.state().time,
        core_particles: field.core_count(),
        halo_particles: field.halo_count(),
        final_orientation: controller
            .last_frame()
            .map(|f| f.orientation)
            .unwrap_or_default(),
        max_drift_ratio,
        core_opacity,
        halo_opacity,
    })
}

pub fn run(config: &MoteConfig, args: SimulateArgs) -> Result<()> {
    let summary = simulate(config, &args).context("Simulation failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
