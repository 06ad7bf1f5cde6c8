//! Wire contract for the pitch-calling link
//!
//! This crate defines everything that must be agreed on by every device
//! sharing one radio channel: the signal record byte layout and the link
//! operating parameters. One coach transmitter and any number of wrist or
//! pocket receivers implement this contract identically; a divergence does
//! not produce decode errors, it produces silently wrong renders.
//!
//! # Signal record
//!
//! All signals use a single fixed-size binary record:
//! ```text
//! ┌──────┬───────┬──────┬─────────┬───────┬──────────┐
//! │ KIND │ PITCH │ ZONE │ PICKOFF │ THIRD │ SEQUENCE │
//! │ 1B   │ 1B    │ 1B   │ 1B      │ 1B    │ 2B (LE)  │
//! └──────┴───────┴──────┴─────────┴───────┴──────────┘
//! ```
//!
//! There is no framing and no checksum in the record itself; the LoRa PHY
//! provides packet boundaries and its own CRC. Decode rejects nothing but
//! a wrong byte count; the receive-side engine tolerates any field
//! combination rather than dropping it.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod signal;

pub use link::LinkParams;
pub use signal::{Pitch, SignalKind, SignalRecord, WireError, PITCH_NONE, RECORD_SIZE};
