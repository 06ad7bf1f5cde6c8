//! Shared device cycles
//!
//! Every board variant runs the same startup-configure-loop shape; the
//! only honest difference between them is which collaborators they plug
//! in. These two types are that shape, written once.

pub mod coach;
pub mod receiver;

pub use coach::{CoachDevice, CoachError, CoachEvent, TX_COOLDOWN_MS};
pub use receiver::ReceiverDevice;
