//! Haptic collaborator trait

use crate::engine::PulsePattern;

/// Trait for the vibration motor (or buzzer standing in for one)
pub trait HapticDriver {
    /// Play one pulse pattern
    ///
    /// Blocking or fire-and-forget per device capability; the core does
    /// not care which, it never queues a second pattern while one could
    /// still be playing at human signal cadence.
    fn play(&mut self, pattern: PulsePattern);
}
