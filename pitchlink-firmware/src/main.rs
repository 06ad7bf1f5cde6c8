//! Pitchlink receiver unit firmware
//!
//! Wrist/pocket receiver for RP2040 boards with an SX1262 module on
//! SPI1 (Waveshare RP2040-LoRa wiring). The shared core does all the
//! deciding; this binary only assembles the collaborators and runs the
//! two tasks: the DIO1 edge watcher and the 10 ms service cycle.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use pitchlink_core::device::ReceiverDevice;
use pitchlink_drivers::{PulseMotor, StatusLed, Sx1262};

use crate::channels::RX_FLAG;
use crate::panel::DefmtPanel;

mod boards;
mod channels;
mod panel;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pitchlink receiver starting...");

    let p = embassy_rp::init(Default::default());

    // Radio SPI bus
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = boards::RADIO_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, spi_config);
    let cs = Output::new(p.PIN_3, Level::High);
    let spi_dev = ExclusiveDevice::new(spi, cs, Delay).unwrap();

    // Radio control pins
    let reset = Output::new(p.PIN_15, Level::High);
    let busy = Input::new(p.PIN_2, Pull::None);
    let radio = Sx1262::new(spi_dev, reset, busy, Delay).with_tcxo(boards::TCXO_1V8);

    // Haptic motor
    let motor = PulseMotor::new(Output::new(p.PIN_22, Level::Low), Delay);

    // Status LED (common-anode RGB, active low)
    let led = StatusLed::new_active_low(
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_16, Level::High),
        Output::new(p.PIN_25, Level::High),
    );

    let device = ReceiverDevice::new(radio, DefmtPanel::new(), motor, &RX_FLAG);

    // Receive completion line
    let dio1 = Input::new(p.PIN_20, Pull::Down);

    spawner.spawn(tasks::radio_irq_task(dio1)).unwrap();
    spawner.spawn(tasks::unit_task(device, led)).unwrap();
}
