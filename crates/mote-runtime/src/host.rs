//! Host page integration: container lookup and renderer readiness

use crate::input::ContainerRect;
use mote_core::{MoteError, Result, RuntimeConfig};
use std::time::Duration;

/// Services the embedding page provides to the particle field
pub trait Host {
    /// Look up the container element by id
    fn container(&self, id: &str) -> Option<ContainerRect>;

    /// Whether the rendering library has finished loading
    fn renderer_available(&self) -> bool;

    /// Block the caller between readiness checks
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Bounded retry schedule for waiting on a late-loading dependency
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Poll the host until the renderer is available.
///
/// Returns the number of checks it took, or `DependencyUnavailable` once the
/// policy's attempts are spent.
pub fn wait_for_renderer<H: Host + ?Sized>(host: &H, policy: &RetryPolicy) -> Result<u32> {
    for attempt in 1..=policy.max_attempts {
        if host.renderer_available() {
            if attempt > 1 {
                log::debug!("Renderer became available after {attempt} checks");
            }
            return Ok(attempt);
        }
        if attempt < policy.max_attempts {
            log::trace!("Renderer not ready (check {attempt}/{})", policy.max_attempts);
            host.sleep(policy.delay);
        }
    }

    log::error!(
        "Renderer still unavailable after {} checks, giving up",
        policy.max_attempts
    );
    Err(MoteError::DependencyUnavailable {
        name: "renderer".to_string(),
        attempts: policy.max_attempts,
    })
}
