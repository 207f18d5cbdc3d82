//! Lightweight phase timing.
//!
//! Disabled by default. Enable with [`enable_timing`] or by setting the
//! `PF_TIMING` environment variable; elapsed times are emitted as `tracing`
//! debug events under the `pf::timing` target.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable phase timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os("PF_TIMING").is_some()
}

/// A timer for one named phase.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Elapsed seconds, or `None` when timing is disabled.
    pub fn stop(self) -> Option<f64> {
        self.enabled.then(|| self.start.elapsed().as_secs_f64())
    }

    /// Stop and report through `tracing`.
    pub fn finish(self) {
        let label = self.label;
        if let Some(elapsed) = self.stop() {
            tracing::debug!(target: "pf::timing", phase = label, elapsed_s = elapsed);
        }
    }
}
