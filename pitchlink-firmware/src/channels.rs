//! Shared statics between tasks
//!
//! The receive flag is the single piece of state the DIO1 watcher and
//! the service cycle share; it is raised by the watcher and consumed by
//! the cycle, never the other way around.

use pitchlink_core::link::RxFlag;

/// Receive completion flag, raised on each DIO1 rising edge
pub static RX_FLAG: RxFlag = RxFlag::new();
