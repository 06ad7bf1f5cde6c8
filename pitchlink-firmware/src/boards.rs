//! Board constants for the RP2040-LoRa receiver unit
//!
//! Wiring (Waveshare RP2040-LoRa, SX1262 on SPI1):
//! - SCK  GP10, MOSI GP11, MISO GP12, NSS GP3
//! - NRESET GP15, BUSY GP2, DIO1 GP20
//! - Vibration motor GP22

/// SPI clock for the SX1262 control interface
pub const RADIO_SPI_HZ: u32 = 8_000_000;

/// TCXO voltage code for the module's 1.8 V oscillator supply
pub const TCXO_1V8: u8 = 0x02;

/// Service cycle cadence in milliseconds
pub const SERVICE_INTERVAL_MS: u64 = 10;
