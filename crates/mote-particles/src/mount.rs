//! Entry point for embedding the field in a host page

use crate::controller::AnimationController;
use crate::field::ParticleField;
use mote_core::{MoteConfig, MoteError, Result};
use mote_runtime::{wait_for_renderer, FrameClock, Host, RetryPolicy, RuntimeSystem, Viewport};

/// Mount a particle field into the container `container_id`.
///
/// A missing container is not fatal: it is logged and `Ok(None)` is returned
/// so the page simply shows no animation. The renderer is polled with the
/// configured retry policy and surfaces `DependencyUnavailable` when it never
/// loads.
pub fn mount<H: Host + ?Sized>(
    host: &H,
    container_id: &str,
    config: &MoteConfig,
) -> Result<Option<AnimationController>> {
    let Some(rect) = host.container(container_id) else {
        let err = MoteError::ContainerNotFound(container_id.to_string());
        log::error!("{err}, particle field not mounted");
        return Ok(None);
    };

    wait_for_renderer(host, &RetryPolicy::from_config(&config.runtime))?;

    let field = ParticleField::from_config(&config.field, config.seed);
    let mut controller = AnimationController::new(field, Viewport::new(rect.width, rect.height))
        .with_clock(FrameClock::with_max_delta(config.runtime.max_frame_delta));
    controller.initialize()?;
    Ok(Some(controller))
}

/// Mount into the container named by `runtime.container_id`
pub fn mount_configured<H: Host + ?Sized>(
    host: &H,
    config: &MoteConfig,
) -> Result<Option<AnimationController>> {
    mount(host, &config.runtime.container_id, config)
}
