//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in pitchlink-core, written against `embedded-hal` 1.0
//! so any board with an SPI bus and a few GPIOs can host them:
//!
//! - SX1262 LoRa transceiver (blocking command interface)
//! - Vibration motor haptic driver
//! - RGB status LED

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod haptic;
pub mod indicator;
pub mod radio;

pub use haptic::PulseMotor;
pub use indicator::{LinkStatus, StatusLed};
pub use radio::Sx1262;
