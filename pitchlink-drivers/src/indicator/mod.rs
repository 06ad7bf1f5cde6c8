//! Link status indicators

mod status_led;

pub use status_led::{LinkStatus, StatusLed};
